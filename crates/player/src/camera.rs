use glam::{Mat4, Vec3};

/// First-person walk camera: position, yaw, pitch, and projection parameters.
///
/// The movement controller writes position; the mouse-capture path writes
/// yaw/pitch through [`WalkCamera::rotate`]. Nothing else mutates the rig.
#[derive(Debug, Clone)]
pub struct WalkCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for WalkCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 30.0, 0.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 70.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1300.0,
            sensitivity: 0.003,
        }
    }
}

impl WalkCamera {
    /// Full view direction, including pitch.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// View direction projected onto the ground plane.
    ///
    /// Walking follows this axis so that looking up or down does not change
    /// travel speed. Zero only at pitch = ±90°, where walking has no
    /// well-defined heading.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalize_or_zero()
    }

    /// Lateral axis of the view, always horizontal.
    pub fn right(&self) -> Vec3 {
        self.flat_forward().cross(Vec3::Y).normalize_or_zero()
    }

    /// Apply a relative mouse delta to yaw/pitch. Pitch is clamped short of
    /// the poles so the view matrix stays well-defined.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Orient the rig toward a world-space target from its current position.
    /// Used once at spawn; afterwards orientation belongs to the mouse.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        let flat_len = (dir.x * dir.x + dir.z * dir.z).sqrt();
        if flat_len > f32::EPSILON || dir.y.abs() > f32::EPSILON {
            self.yaw = dir.z.atan2(dir.x);
            self.pitch = dir.y.atan2(flat_len).clamp(
                -89.0_f32.to_radians(),
                89.0_f32.to_radians(),
            );
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_is_valid() {
        let cam = WalkCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
        assert!(cam.position.is_finite());
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut cam = WalkCamera::default();
        cam.rotate(0.0, -100_000.0);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
        cam.rotate(0.0, 100_000.0);
        assert!(cam.pitch >= -89.0_f32.to_radians() - 1e-6);
    }

    #[test]
    fn flat_forward_ignores_pitch() {
        let mut cam = WalkCamera::default();
        let level = cam.flat_forward();
        cam.rotate(0.0, 500.0); // look down
        assert!(cam.pitch < 0.0);
        let pitched = cam.flat_forward();
        assert!((level - pitched).length() < 1e-6);
        assert_eq!(pitched.y, 0.0);
    }

    #[test]
    fn right_is_perpendicular_and_horizontal() {
        let cam = WalkCamera::default();
        let r = cam.right();
        assert_eq!(r.y, 0.0);
        assert!(r.dot(cam.flat_forward()).abs() < 1e-6);
    }

    #[test]
    fn look_at_faces_target() {
        let mut cam = WalkCamera {
            position: Vec3::new(450.0, 30.0, -290.0),
            ..WalkCamera::default()
        };
        cam.look_at(Vec3::new(-1800.0, 0.0, -400.0));
        let dir = (Vec3::new(-1800.0, 0.0, -400.0) - cam.position).normalize();
        assert!(cam.forward().dot(dir) > 0.999);
    }
}
