//! Shared types for the storewalk walkthrough.
//!
//! # Invariants
//! - `BoundaryVolume` has min <= max on every axis once constructed.
//! - Clamping is pure and idempotent; it never produces NaN from finite input.

pub mod boundary;
pub mod types;

pub use boundary::{BoundaryError, BoundaryVolume};
pub use types::Transform;
