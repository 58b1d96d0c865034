//! wgpu render backend for the walkthrough.
//!
//! Draws the gradient sky dome, then the scene's instances as lit
//! placeholder volumes (boxes and cones), opaque before translucent.
//!
//! # Invariants
//! - The renderer never mutates the scene graph or the camera rig.
//! - A frame can always be drawn, however few assets have loaded.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::WgpuRenderer;
