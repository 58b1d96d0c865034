use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storewalk_common::{BoundaryError, BoundaryVolume};
use storewalk_input::MoveBindings;

/// Errors from scene configuration handling.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Camera intrinsics and initial placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Spawn point; the y component is replaced by the player's eye height.
    pub spawn: Vec3,
    /// World point the camera initially faces.
    pub look_at: Vec3,
}

/// Player movement tuning. Fixed scalars, read once at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// World units per tick while a movement key is held.
    pub speed: f32,
    pub eye_height: f32,
}

/// Walkable-region boundary with its explicit on/off switch.
///
/// Some scene variants run without boundary enforcement; that choice is
/// part of the configuration, not a code path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub enabled: bool,
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundaryConfig {
    /// The volume to clamp against, or None when enforcement is off.
    pub fn volume(&self) -> Result<Option<BoundaryVolume>, BoundaryError> {
        if !self.enabled {
            return Ok(None);
        }
        BoundaryVolume::new(self.min, self.max).map(Some)
    }
}

/// One hand-placed model: where it goes and how big it renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    /// Path to the model's glTF file, relative to the asset root.
    pub model: String,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub scale: f32,
    /// Approximate model bounds in model units; the placeholder volume is
    /// `extent * scale`.
    pub extent: Vec3,
}

/// A light in the scene. Directional lights aim from `position` toward
/// `target`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightConfig {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Directional {
        color: [f32; 3],
        intensity: f32,
        position: Vec3,
        target: Vec3,
    },
}

/// A backdrop mountain cone on the horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mountain {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    pub yaw_degrees: f32,
}

/// Gradient sky dome plus its mountain backdrop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyConfig {
    pub top_color: [f32; 3],
    pub bottom_color: [f32; 3],
    pub offset: f32,
    pub exponent: f32,
    pub dome_radius: f32,
    pub mountain_color: [f32; 3],
    pub mountains: Vec<Mountain>,
}

/// A procedural box structure: walls, floor, roof, glass door.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    pub name: String,
    pub size: Vec3,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub color: [f32; 4],
}

/// Storefront signage text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignConfig {
    pub text: String,
    pub size: f32,
    pub color: [f32; 3],
    pub position: Vec3,
    pub yaw_degrees: f32,
}

/// Background audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub track: String,
    pub volume: f32,
    pub looped: bool,
}

/// Everything that varies between scene variants, in one structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub bindings: MoveBindings,
    pub sky: SkyConfig,
    pub lights: Vec<LightConfig>,
    pub structures: Vec<StructureConfig>,
    pub signs: Vec<SignConfig>,
    pub placements: Vec<Placement>,
    pub audio: AudioConfig,
}

impl SceneConfig {
    /// Load a scene config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check the config for values the walkthrough cannot run with.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(SceneError::Invalid(format!(
                "fov must be in (0, 180), got {}",
                self.camera.fov_degrees
            )));
        }
        if self.camera.near <= 0.0 || self.camera.near >= self.camera.far {
            return Err(SceneError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got {}..{}",
                self.camera.near, self.camera.far
            )));
        }
        if self.player.speed <= 0.0 {
            return Err(SceneError::Invalid("player speed must be positive".into()));
        }
        if self.player.eye_height <= 0.0 {
            return Err(SceneError::Invalid("eye height must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(SceneError::Invalid(format!(
                "audio volume must be in [0, 1], got {}",
                self.audio.volume
            )));
        }
        if let Some(volume) = self.boundary.volume()? {
            let eye = Vec3::new(
                self.camera.spawn.x,
                self.player.eye_height,
                self.camera.spawn.z,
            );
            if !volume.contains(eye) {
                return Err(SceneError::Invalid(format!(
                    "spawn point {eye} lies outside the enabled boundary"
                )));
            }
        }
        Ok(())
    }

    /// The built-in retail-store walkthrough.
    pub fn retail_store() -> Self {
        let registers = [-120.0_f32, -60.0, 0.0].into_iter().enumerate().map(|(i, x)| {
            Placement {
                name: format!("cash_register_{}", i + 1),
                model: "assets/models/supermarket/cash-register.gltf".into(),
                position: Vec3::new(x, 0.0, -120.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(0.8, 1.0, 0.6),
            }
        });

        let carts = [
            (Vec3::new(0.0, 0.0, -170.0), 47.0),
            (Vec3::new(0.0, 0.0, -200.0), 203.0),
            (Vec3::new(-50.0, 0.0, -170.0), 118.0),
            (Vec3::new(-30.0, 0.0, -200.0), 331.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (position, yaw))| Placement {
            name: format!("shopping_cart_{}", i + 1),
            model: "assets/models/supermarket/shopping-cart.gltf".into(),
            position,
            yaw_degrees: yaw,
            scale: 25.0,
            extent: Vec3::new(0.9, 1.0, 0.5),
        });

        let mut placements = vec![
            Placement {
                name: "parking_lot".into(),
                model: "assets/models/parking-lot/scene.gltf".into(),
                position: Vec3::ZERO,
                yaw_degrees: 0.0,
                scale: 0.3,
                extent: Vec3::new(1200.0, 4.0, 900.0),
            },
            Placement {
                name: "shelf_row_a".into(),
                model: "assets/models/modular_shelves/scene.gltf".into(),
                position: Vec3::new(-60.0, 0.0, -270.0),
                yaw_degrees: 90.0,
                scale: 0.2,
                extent: Vec3::new(500.0, 180.0, 90.0),
            },
            Placement {
                name: "shelf_row_b".into(),
                model: "assets/models/modular_shelves/scene.gltf".into(),
                position: Vec3::new(-60.0, 0.0, -390.0),
                yaw_degrees: 90.0,
                scale: 0.2,
                extent: Vec3::new(500.0, 180.0, 90.0),
            },
            Placement {
                name: "paint_aisle".into(),
                model: "assets/models/paint_aisle/scene.gltf".into(),
                position: Vec3::new(-60.0, 0.0, -522.0),
                yaw_degrees: 0.0,
                scale: 9.0,
                extent: Vec3::new(14.0, 4.0, 2.5),
            },
            Placement {
                name: "cashier".into(),
                model: "assets/models/supermarket/character-employee.gltf".into(),
                position: Vec3::new(6.0, 0.0, -129.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(0.5, 1.8, 0.5),
            },
            Placement {
                name: "decorated_tree".into(),
                model: "assets/models/tree_decorated/treeDecorated.gltf".into(),
                position: Vec3::new(-200.0, 0.0, -150.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(1.0, 2.2, 1.0),
            },
            Placement {
                name: "present_green_round".into(),
                model: "assets/models/presents/presentGreenRound.gltf".into(),
                position: Vec3::new(-180.0, 0.0, -150.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(0.4, 0.4, 0.4),
            },
            Placement {
                name: "present_round".into(),
                model: "assets/models/presents/presentRound.gltf".into(),
                position: Vec3::new(-200.0, 0.0, -130.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(0.4, 0.4, 0.4),
            },
            Placement {
                name: "present_green_low".into(),
                model: "assets/models/presents/presentGreenLow.gltf".into(),
                position: Vec3::new(-200.0, 0.0, -170.0),
                yaw_degrees: 0.0,
                scale: 30.0,
                extent: Vec3::new(0.4, 0.3, 0.4),
            },
            Placement {
                name: "fancy_snowman".into(),
                model: "assets/models/snowman/snowmanFancy.gltf".into(),
                position: Vec3::new(-220.0, 0.0, -480.0),
                yaw_degrees: 225.0,
                scale: 70.0,
                extent: Vec3::new(0.5, 1.1, 0.5),
            },
        ];
        placements.extend(registers);
        placements.extend(carts);

        let wall_color = [0.82, 0.8, 0.76, 1.0];
        let structures = vec![
            StructureConfig {
                name: "floor".into(),
                size: Vec3::new(300.0, 0.2, 450.0),
                position: Vec3::new(-102.0, 0.0, -300.0),
                yaw_degrees: 0.0,
                color: [0.55, 0.52, 0.48, 1.0],
            },
            StructureConfig {
                name: "roof".into(),
                size: Vec3::new(300.0, 0.2, 450.0),
                position: Vec3::new(-102.0, 60.0, -300.0),
                yaw_degrees: 0.0,
                color: [0.42, 0.44, 0.47, 1.0],
            },
            StructureConfig {
                name: "back_wall".into(),
                size: Vec3::new(300.0, 60.0, 0.5),
                position: Vec3::new(-102.0, 30.0, -525.0),
                yaw_degrees: 0.0,
                color: wall_color,
            },
            StructureConfig {
                name: "left_wall".into(),
                size: Vec3::new(0.15, 60.0, 450.0),
                position: Vec3::new(-252.0, 30.0, -300.0),
                yaw_degrees: 0.0,
                color: wall_color,
            },
            StructureConfig {
                name: "right_wall".into(),
                size: Vec3::new(0.15, 60.0, 450.0),
                position: Vec3::new(48.0, 30.0, -300.0),
                yaw_degrees: 0.0,
                color: wall_color,
            },
            StructureConfig {
                name: "front_wall".into(),
                size: Vec3::new(300.0, 60.0, 0.5),
                position: Vec3::new(-102.0, 30.0, -75.0),
                yaw_degrees: 0.0,
                color: wall_color,
            },
            StructureConfig {
                name: "glass_door".into(),
                size: Vec3::new(0.2, 50.0, 50.0),
                position: Vec3::new(50.0, 25.0, -295.0),
                yaw_degrees: 0.0,
                color: [0.68, 0.85, 0.9, 0.5],
            },
            StructureConfig {
                name: "entrance_gable".into(),
                size: Vec3::new(0.1, 30.0, 130.0),
                position: Vec3::new(42.0, 62.0, -280.0),
                yaw_degrees: 0.0,
                color: [0.55, 0.27, 0.07, 1.0],
            },
        ];

        Self {
            name: "retail_store".into(),
            camera: CameraConfig {
                fov_degrees: 70.0,
                near: 0.1,
                far: 1300.0,
                spawn: Vec3::new(450.0, 30.0, -290.0),
                look_at: Vec3::new(-1800.0, 0.0, -400.0),
            },
            player: PlayerConfig {
                speed: 4.0,
                eye_height: 30.0,
            },
            boundary: BoundaryConfig {
                enabled: true,
                min: Vec3::new(-250.0, 0.0, -514.0),
                max: Vec3::new(550.0, 200.0, -65.0),
            },
            bindings: MoveBindings::default(),
            sky: SkyConfig {
                top_color: [0.53, 0.81, 0.92],
                bottom_color: [1.0, 1.0, 1.0],
                offset: 33.0,
                exponent: 0.6,
                dome_radius: 700.0,
                mountain_color: [0.13, 0.55, 0.13],
                mountains: (0..4)
                    .map(|i| Mountain {
                        position: Vec3::new(-550.0, 0.0, -700.0 + i as f32 * 300.0),
                        radius: 150.0,
                        height: 300.0,
                        yaw_degrees: i as f32 * 73.0,
                    })
                    .collect(),
            },
            lights: vec![
                LightConfig::Ambient {
                    color: [1.0, 1.0, 1.0],
                    intensity: 0.3,
                },
                LightConfig::Directional {
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                    position: Vec3::new(10.0, 400.0, 10.0),
                    target: Vec3::new(-200.0, 0.0, -100.0),
                },
                LightConfig::Directional {
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                    position: Vec3::new(-100.0, 400.0, -300.0),
                    target: Vec3::new(-100.0, 0.0, -100.0),
                },
            ],
            structures,
            signs: vec![
                SignConfig {
                    text: "The Home Depot".into(),
                    size: 12.0,
                    color: [1.0, 0.4, 0.0],
                    position: Vec3::new(50.0, 45.0, -230.0),
                    yaw_degrees: 90.0,
                },
                SignConfig {
                    text: "Happy Holidays Team".into(),
                    size: 8.0,
                    color: [0.2, 0.8, 0.2],
                    position: Vec3::new(-250.0, 40.0, -200.0),
                    yaw_degrees: 90.0,
                },
            ],
            placements,
            audio: AudioConfig {
                track: "assets/music/ambient_loop.mp3".into(),
                volume: 0.2,
                looped: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retail_store_is_valid() {
        let config = SceneConfig::retail_store();
        config.validate().unwrap();
        assert!(!config.placements.is_empty());
        assert_eq!(config.boundary.min, Vec3::new(-250.0, 0.0, -514.0));
        assert_eq!(config.boundary.max, Vec3::new(550.0, 200.0, -65.0));
    }

    #[test]
    fn disabled_boundary_yields_no_volume() {
        let mut config = SceneConfig::retail_store();
        config.boundary.enabled = false;
        assert!(config.boundary.volume().unwrap().is_none());
    }

    #[test]
    fn enabled_boundary_contains_spawn() {
        let config = SceneConfig::retail_store();
        let volume = config.boundary.volume().unwrap().unwrap();
        let eye = Vec3::new(
            config.camera.spawn.x,
            config.player.eye_height,
            config.camera.spawn.z,
        );
        assert!(volume.contains(eye));
    }

    #[test]
    fn spawn_outside_boundary_fails_validation() {
        let mut config = SceneConfig::retail_store();
        config.camera.spawn.x = 10_000.0;
        assert!(matches!(config.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn zero_speed_fails_validation() {
        let mut config = SceneConfig::retail_store();
        config.player.speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_loads_back_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let config = SceneConfig::retail_store();
        config.save(&path).unwrap();

        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(loaded.name, config.name);
        assert_eq!(loaded.placements.len(), config.placements.len());
        assert_eq!(loaded.player.speed, 4.0);
        assert_eq!(loaded.bindings.forward, "KeyW");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(SceneConfig::load(&path), Err(SceneError::Json(_))));
    }
}
