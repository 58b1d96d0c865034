use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Transform placed at a position with identity rotation and unit scale.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Transform with a yaw rotation (radians about +Y) and uniform scale.
    pub fn placed(position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
            scale: Vec3::splat(scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn placed_applies_yaw_and_scale() {
        let t = Transform::placed(Vec3::new(-60.0, 0.0, -270.0), std::f32::consts::FRAC_PI_2, 0.2);
        assert_eq!(t.position.z, -270.0);
        assert_eq!(t.scale, Vec3::splat(0.2));
        let fwd = t.rotation * Vec3::Z;
        // Quarter turn about Y maps +Z onto +X
        assert!((fwd.x - 1.0).abs() < 1e-6);
    }
}
