use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Content-addressed model ID computed from the model metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Metadata for a loaded store model.
///
/// The renderer draws props as tinted placeholder volumes, so what the
/// registry keeps is identity and appearance, not vertex data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub mesh_count: u32,
    pub base_color: [f32; 4],
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("model not found: {0:?}")]
    NotFound(AssetId),
    #[error("glTF parse error: {0}")]
    GltfParse(String),
}

/// Content-addressed registry of store models.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    models: BTreeMap<AssetId, ModelInfo>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model and return its content-addressed ID. Registering
    /// identical metadata twice yields the same ID and a single entry.
    pub fn register(&mut self, model: ModelInfo) -> AssetId {
        let id = content_hash(&model);
        self.models.insert(id, model);
        id
    }

    pub fn get(&self, id: AssetId) -> Option<&ModelInfo> {
        self.models.get(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Import a glTF model's metadata and register it.
    ///
    /// Reads the glTF JSON, counts meshes, and takes the first material's
    /// base color for the placeholder tint. Vertex data stays on disk; the
    /// walkthrough never needs it for movement or boundary logic.
    pub fn import_gltf(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<AssetId, AssetError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let json: serde_json::Value =
            serde_json::from_str(&data).map_err(|e| AssetError::GltfParse(e.to_string()))?;

        let mesh_count = json
            .get("meshes")
            .and_then(|m| m.as_array())
            .map(|m| m.len() as u32)
            .unwrap_or(0);

        let base_color = json
            .get("materials")
            .and_then(|m| m.as_array())
            .and_then(|m| m.first())
            .and_then(|mat| mat.get("pbrMetallicRoughness"))
            .and_then(|pbr| pbr.get("baseColorFactor"))
            .and_then(|c| c.as_array())
            .map(|arr| {
                let mut color = [0.8_f32, 0.8, 0.8, 1.0];
                for (i, v) in arr.iter().enumerate().take(4) {
                    if let Some(f) = v.as_f64() {
                        color[i] = f as f32;
                    }
                }
                color
            })
            .unwrap_or([0.8, 0.8, 0.8, 1.0]);

        let id = self.register(ModelInfo {
            name: name.to_owned(),
            mesh_count,
            base_color,
        });
        tracing::debug!(name, ?id, mesh_count, "imported glTF metadata");
        Ok(id)
    }
}

fn content_hash(model: &ModelInfo) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update(model.name.as_bytes());
    hasher.update(model.mesh_count.to_le_bytes());
    for c in model.base_color {
        hasher.update(c.to_le_bytes());
    }
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn shelf() -> ModelInfo {
        ModelInfo {
            name: "modular_shelves".into(),
            mesh_count: 3,
            base_color: [0.6, 0.5, 0.4, 1.0],
        }
    }

    #[test]
    fn register_and_get() {
        let mut store = AssetStore::new();
        let id = store.register(shelf());
        assert_eq!(store.get(id).unwrap().name, "modular_shelves");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = AssetStore::new();
        let a = store.register(shelf());
        let b = store.register(shelf());
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn import_gltf_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"meshes":[{{"name":"cart"}},{{"name":"wheel"}}],
                "materials":[{{"pbrMetallicRoughness":{{"baseColorFactor":[0.1,0.2,0.3,1.0]}}}}]}}"#
        )
        .unwrap();

        let mut store = AssetStore::new();
        let id = store.import_gltf("shopping_cart", file.path()).unwrap();
        let info = store.get(id).unwrap();
        assert_eq!(info.mesh_count, 2);
        assert!((info.base_color[2] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn import_missing_file_errors() {
        let mut store = AssetStore::new();
        let err = store.import_gltf("ghost", "/no/such/model.gltf");
        assert!(matches!(err, Err(AssetError::Io(_))));
    }

    #[test]
    fn import_malformed_json_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not gltf at all").unwrap();
        let mut store = AssetStore::new();
        let err = store.import_gltf("bad", file.path());
        assert!(matches!(err, Err(AssetError::GltfParse(_))));
    }
}
