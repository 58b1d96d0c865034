//! Held-key state and movement bindings.
//!
//! Input is an explicitly owned value passed into the controller, never
//! ambient global state. Platform code records key transitions on events;
//! the controller reads the state once per tick.
//!
//! # Invariants
//! - Absent keys read as not held.
//! - Unknown key codes are recorded but harmless; nothing binds to them.

pub mod bindings;
pub mod state;

pub use bindings::MoveBindings;
pub use state::InputState;
