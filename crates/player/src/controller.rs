use glam::Vec3;
use storewalk_input::{InputState, MoveBindings};

use crate::camera::WalkCamera;

/// Per-tick movement integration for the walk camera.
///
/// Speed and eye height are fixed scalars chosen at construction from the
/// scene configuration. Eye height is used only at initial placement.
#[derive(Debug, Clone, Copy)]
pub struct PlayerController {
    speed: f32,
    eye_height: f32,
}

impl PlayerController {
    pub fn new(speed: f32, eye_height: f32) -> Self {
        Self { speed, eye_height }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }

    /// Place the rig at a spawn point, eye height above the floor.
    pub fn place(&self, camera: &mut WalkCamera, spawn: Vec3) {
        camera.position = Vec3::new(spawn.x, self.eye_height, spawn.z);
    }

    /// Apply one tick of movement from the currently held keys.
    ///
    /// Each held binding contributes its full ±speed delta along the
    /// camera's ground-plane forward or lateral axis, and the deltas
    /// compose additively. Opposing keys cancel through the sum, and a
    /// diagonal is faster than either axis alone; that inflation is kept,
    /// not normalized away.
    pub fn advance(
        &self,
        camera: &mut WalkCamera,
        input: &InputState,
        bindings: &MoveBindings,
    ) {
        let forward = camera.flat_forward();
        let right = camera.right();

        let mut delta = Vec3::ZERO;
        if input.is_held(&bindings.forward) {
            delta += forward * self.speed;
        }
        if input.is_held(&bindings.backward) {
            delta -= forward * self.speed;
        }
        if input.is_held(&bindings.strafe_left) {
            delta -= right * self.speed;
        }
        if input.is_held(&bindings.strafe_right) {
            delta += right * self.speed;
        }

        camera.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Camera inside the store aisles, facing -Z.
    fn camera_facing_minus_z() -> WalkCamera {
        WalkCamera {
            position: Vec3::new(300.0, 30.0, -290.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            ..WalkCamera::default()
        }
    }

    #[test]
    fn forward_tick_moves_by_speed() {
        let pc = PlayerController::new(4.0, 30.0);
        let mut cam = camera_facing_minus_z();
        let mut input = InputState::new();
        input.set_key("KeyW", true);

        pc.advance(&mut cam, &input, &MoveBindings::default());

        assert!((cam.position.x - 300.0).abs() < 1e-4);
        assert!((cam.position.y - 30.0).abs() < 1e-4);
        assert!((cam.position.z - -294.0).abs() < 1e-4);
    }

    #[test]
    fn no_input_is_a_no_op() {
        let pc = PlayerController::new(4.0, 30.0);
        let mut cam = camera_facing_minus_z();
        let start = cam.position;
        pc.advance(&mut cam, &InputState::new(), &MoveBindings::default());
        assert_eq!(cam.position, start);
    }

    #[test]
    fn diagonal_is_the_vector_sum() {
        let pc = PlayerController::new(4.0, 30.0);
        let bindings = MoveBindings::default();

        let mut fwd_only = camera_facing_minus_z();
        let mut input = InputState::new();
        input.set_key("KeyW", true);
        pc.advance(&mut fwd_only, &input, &bindings);
        let fwd_delta = fwd_only.position - Vec3::new(300.0, 30.0, -290.0);

        let mut right_only = camera_facing_minus_z();
        let mut input = InputState::new();
        input.set_key("KeyD", true);
        pc.advance(&mut right_only, &input, &bindings);
        let right_delta = right_only.position - Vec3::new(300.0, 30.0, -290.0);

        let mut both = camera_facing_minus_z();
        let mut input = InputState::new();
        input.set_key("KeyW", true);
        input.set_key("KeyD", true);
        pc.advance(&mut both, &input, &bindings);
        let diag_delta = both.position - Vec3::new(300.0, 30.0, -290.0);

        assert!((diag_delta - (fwd_delta + right_delta)).length() < 1e-4);
        // Unnormalized: the diagonal outruns either axis alone.
        assert!(diag_delta.length() > fwd_delta.length());
    }

    #[test]
    fn opposing_strafes_cancel_through_the_sum() {
        let pc = PlayerController::new(4.0, 30.0);
        let mut cam = camera_facing_minus_z();
        let mut input = InputState::new();
        input.set_key("KeyA", true);
        input.set_key("KeyD", true);
        pc.advance(&mut cam, &input, &MoveBindings::default());
        assert!((cam.position - Vec3::new(300.0, 30.0, -290.0)).length() < 1e-5);
    }

    #[test]
    fn place_uses_eye_height() {
        let pc = PlayerController::new(4.0, 30.0);
        let mut cam = WalkCamera::default();
        pc.place(&mut cam, Vec3::new(450.0, 0.0, -290.0));
        assert_eq!(cam.position, Vec3::new(450.0, 30.0, -290.0));
    }

    #[test]
    fn movement_stays_on_eye_plane_when_looking_down() {
        let pc = PlayerController::new(4.0, 30.0);
        let mut cam = camera_facing_minus_z();
        cam.rotate(0.0, 800.0); // pitch well below the horizon
        let mut input = InputState::new();
        input.set_key("KeyW", true);
        pc.advance(&mut cam, &input, &MoveBindings::default());
        assert!((cam.position.y - 30.0).abs() < 1e-5);
    }
}
