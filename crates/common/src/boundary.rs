use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from boundary construction.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("boundary min exceeds max on axis {axis}: {min} > {max}")]
    Inverted { axis: char, min: f32, max: f32 },
}

/// Axis-aligned box defining the walkable region of a scene.
///
/// The volume is immutable after construction and represents the interior
/// footprint of the store. Clamping is advisory floor/wall collision: it
/// silently halts translation at the boundary rather than rejecting the
/// attempted move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryVolume {
    min: Vec3,
    max: Vec3,
}

impl BoundaryVolume {
    /// Build a boundary from min/max corners. Fails if min > max on any axis.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, BoundaryError> {
        for (axis, lo, hi) in [
            ('x', min.x, max.x),
            ('y', min.y, max.y),
            ('z', min.z, max.z),
        ] {
            if lo > hi {
                return Err(BoundaryError::Inverted { axis, min: lo, max: hi });
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Clip a position independently per axis into `[min, max]`.
    ///
    /// Pure and idempotent: `clamp(clamp(p)) == clamp(p)`, and a position
    /// already inside comes back unchanged.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Whether a position lies within the volume on every axis.
    pub fn contains(&self, p: Vec3) -> bool {
        self.clamp(p) == p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_boundary() -> BoundaryVolume {
        BoundaryVolume::new(
            Vec3::new(-250.0, 0.0, -514.0),
            Vec3::new(550.0, 200.0, -65.0),
        )
        .unwrap()
    }

    #[test]
    fn inverted_axis_rejected() {
        let err = BoundaryVolume::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        assert!(err.is_err());
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = store_boundary();
        for p in [
            Vec3::new(600.0, 30.0, -290.0),
            Vec3::new(-9999.0, 500.0, 0.0),
            Vec3::new(0.0, 50.0, -300.0),
        ] {
            let once = b.clamp(p);
            assert_eq!(b.clamp(once), once);
        }
    }

    #[test]
    fn clamp_contains_result() {
        let b = store_boundary();
        let p = b.clamp(Vec3::new(10_000.0, -10_000.0, 3.0));
        assert!(b.contains(p));
    }

    #[test]
    fn inside_position_unchanged() {
        let b = store_boundary();
        let p = Vec3::new(300.0, 30.0, -290.0);
        assert_eq!(b.clamp(p), p);
    }

    #[test]
    fn walkout_clamps_to_east_wall() {
        let b = store_boundary();
        let clamped = b.clamp(Vec3::new(600.0, 30.0, -290.0));
        assert_eq!(clamped, Vec3::new(550.0, 30.0, -290.0));
    }

    #[test]
    fn externally_injected_position_corrected() {
        let b = store_boundary();
        // A position forced outside by some external writer is corrected on
        // the next clamp pass rather than rejected.
        let corrected = b.clamp(Vec3::new(551.0, 250.0, -520.0));
        assert_eq!(corrected, Vec3::new(550.0, 200.0, -514.0));
    }
}
