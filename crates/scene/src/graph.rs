use glam::Vec3;
use storewalk_assets::ModelInfo;
use storewalk_common::Transform;

use crate::config::{LightConfig, Placement, SceneConfig, SignConfig};

/// Placeholder volume the renderer draws for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    /// Unit cube scaled by the instance transform.
    Box,
    /// Unit cone (apex up) scaled by the instance transform.
    Cone,
}

/// One renderable thing in the scene.
#[derive(Debug, Clone)]
pub struct PropInstance {
    pub name: String,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub color: [f32; 4],
}

/// Runtime light, with directional aim already resolved.
#[derive(Debug, Clone, Copy)]
pub enum Light {
    Ambient { color: [f32; 3], intensity: f32 },
    Directional {
        direction: Vec3,
        color: [f32; 3],
        intensity: f32,
    },
}

/// Gradient sky parameters handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct SkyParams {
    pub top_color: [f32; 3],
    pub bottom_color: [f32; 3],
    pub offset: f32,
    pub exponent: f32,
    pub dome_radius: f32,
}

/// All renderable content of a scene variant.
///
/// Built once by [`SceneGraph::assemble`] from procedural content; model
/// props join afterwards through [`SceneGraph::add_loaded_model`] as their
/// asynchronous loads complete. The movement/boundary core never reads any
/// of this.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub name: String,
    pub sky: SkyParams,
    pub lights: Vec<Light>,
    instances: Vec<PropInstance>,
}

impl SceneGraph {
    /// Build the procedural portion of a scene: structures, mountains,
    /// signage. Placement models are not touched here; they arrive later,
    /// or never, if their loads fail.
    pub fn assemble(config: &SceneConfig) -> Self {
        let mut instances = Vec::new();

        for s in &config.structures {
            instances.push(PropInstance {
                name: s.name.clone(),
                mesh: MeshKind::Box,
                transform: Transform {
                    position: s.position,
                    rotation: glam::Quat::from_rotation_y(s.yaw_degrees.to_radians()),
                    scale: s.size,
                },
                color: s.color,
            });
        }

        for (i, m) in config.sky.mountains.iter().enumerate() {
            instances.push(PropInstance {
                name: format!("mountain_{}", i + 1),
                mesh: MeshKind::Cone,
                transform: Transform {
                    position: m.position,
                    rotation: glam::Quat::from_rotation_y(m.yaw_degrees.to_radians()),
                    scale: Vec3::new(m.radius, m.height, m.radius),
                },
                color: [
                    config.sky.mountain_color[0],
                    config.sky.mountain_color[1],
                    config.sky.mountain_color[2],
                    1.0,
                ],
            });
        }

        for sign in &config.signs {
            instances.push(sign_panel(sign));
        }

        let lights = config.lights.iter().map(resolve_light).collect();

        tracing::debug!(
            scene = %config.name,
            procedural = instances.len(),
            pending_models = config.placements.len(),
            "scene assembled"
        );

        Self {
            name: config.name.clone(),
            sky: SkyParams {
                top_color: config.sky.top_color,
                bottom_color: config.sky.bottom_color,
                offset: config.sky.offset,
                exponent: config.sky.exponent,
                dome_radius: config.sky.dome_radius,
            },
            lights,
            instances,
        }
    }

    /// Insert a placed model once its load has completed.
    pub fn add_loaded_model(&mut self, placement: &Placement, info: &ModelInfo) {
        let scale = placement.extent * placement.scale;
        self.instances.push(PropInstance {
            name: placement.name.clone(),
            mesh: MeshKind::Box,
            transform: Transform {
                // Placements sit on the floor; the box is centered.
                position: placement.position + Vec3::new(0.0, scale.y * 0.5, 0.0),
                rotation: glam::Quat::from_rotation_y(placement.yaw_degrees.to_radians()),
                scale,
            },
            color: info.base_color,
        });
    }

    pub fn instances(&self) -> &[PropInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Signage renders as a thin panel sized from the text until real glyph
/// geometry exists; the text itself survives in the instance name for
/// inspection output.
fn sign_panel(sign: &SignConfig) -> PropInstance {
    let width = sign.text.chars().count() as f32 * sign.size * 0.6;
    PropInstance {
        name: format!("sign '{}'", sign.text),
        mesh: MeshKind::Box,
        transform: Transform {
            position: sign.position,
            rotation: glam::Quat::from_rotation_y(sign.yaw_degrees.to_radians()),
            scale: Vec3::new(width, sign.size * 1.2, 0.6),
        },
        color: [sign.color[0], sign.color[1], sign.color[2], 1.0],
    }
}

fn resolve_light(config: &LightConfig) -> Light {
    match config {
        LightConfig::Ambient { color, intensity } => Light::Ambient {
            color: *color,
            intensity: *intensity,
        },
        LightConfig::Directional {
            color,
            intensity,
            position,
            target,
        } => Light::Directional {
            direction: (*target - *position).normalize_or_zero(),
            color: *color,
            intensity: *intensity,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn assemble_builds_procedural_content() {
        let config = SceneConfig::retail_store();
        let graph = SceneGraph::assemble(&config);
        let expected =
            config.structures.len() + config.sky.mountains.len() + config.signs.len();
        assert_eq!(graph.len(), expected);
        assert!(graph.instances().iter().any(|i| i.name == "floor"));
        assert!(graph.instances().iter().any(|i| i.mesh == MeshKind::Cone));
    }

    #[test]
    fn models_join_as_loads_complete() {
        let config = SceneConfig::retail_store();
        let mut graph = SceneGraph::assemble(&config);
        let before = graph.len();

        let info = ModelInfo {
            name: "modular_shelves".into(),
            mesh_count: 3,
            base_color: [0.6, 0.5, 0.4, 1.0],
        };
        graph.add_loaded_model(&config.placements[1], &info);
        assert_eq!(graph.len(), before + 1);

        let shelf = graph
            .instances()
            .iter()
            .find(|i| i.name == "shelf_row_a")
            .unwrap();
        // extent * scale, lifted to rest on the floor
        assert!((shelf.transform.scale.x - 100.0).abs() < 1e-4);
        assert!(shelf.transform.position.y > 0.0);
    }

    #[test]
    fn directional_lights_resolve_aim() {
        let config = SceneConfig::retail_store();
        let graph = SceneGraph::assemble(&config);
        let dir = graph.lights.iter().find_map(|l| match l {
            Light::Directional { direction, .. } => Some(*direction),
            _ => None,
        });
        let d = dir.unwrap();
        assert!(d.y < 0.0); // overhead lights aim down
        assert!((d.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sign_panel_width_tracks_text() {
        let config = SceneConfig::retail_store();
        let graph = SceneGraph::assemble(&config);
        let long = graph
            .instances()
            .iter()
            .find(|i| i.name.contains("Happy Holidays"))
            .unwrap();
        let short = graph
            .instances()
            .iter()
            .find(|i| i.name.contains("Home Depot"))
            .unwrap();
        assert!(long.transform.scale.x > 0.0);
        // Longer text at smaller size still differs from the big sign.
        assert_ne!(long.transform.scale.x, short.transform.scale.x);
    }
}
