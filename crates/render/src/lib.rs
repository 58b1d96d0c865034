//! Renderer-agnostic interface.
//!
//! # Invariants
//! - A renderer never mutates the scene graph or the camera; each frame
//!   derives from scene content plus a view.
//!
//! The debug text renderer serves the headless CLI and tests; the wgpu
//! backend lives in its own crate and implements the same trait.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
