//! First-person player: camera rig, pointer-capture gating, movement.
//!
//! The tick contract is: read input, `PlayerController::advance`, clamp
//! against the scene boundary, render. The controller mutates only the rig's
//! position; orientation is owned by the mouse-capture mechanism.
//!
//! # Invariants
//! - The rig position is always finite.
//! - Movement deltas compose additively; opposing keys cancel through the
//!   sum and diagonals are faster than a single axis.
//! - `PointerLock` enters Locked only on an explicit user gesture.

pub mod camera;
pub mod controller;
pub mod lock;

pub use camera::WalkCamera;
pub use controller::PlayerController;
pub use lock::{LockState, PointerLock};
