//! Scene configuration and assembly.
//!
//! A scene variant is one [`SceneConfig`] value: boundary box and flag,
//! placement list, camera intrinsics, player tuning, lights, sky and
//! structure geometry, signage, audio track, and key bindings. A single
//! generic assembly routine turns any config into a [`SceneGraph`];
//! variants differ only in data, never in code.
//!
//! # Invariants
//! - Assembly never reads the filesystem; model props are inserted later
//!   as their loads complete.
//! - The graph tolerates absent models: a failed load just means the prop
//!   never appears.

pub mod config;
pub mod graph;

pub use config::{
    AudioConfig, BoundaryConfig, CameraConfig, LightConfig, Mountain, Placement, PlayerConfig,
    SceneConfig, SceneError, SignConfig, SkyConfig, StructureConfig,
};
pub use graph::{Light, MeshKind, PropInstance, SceneGraph, SkyParams};
