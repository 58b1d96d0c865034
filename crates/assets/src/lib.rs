//! Asset handling for the walkthrough: a content-addressed model registry
//! and the load barrier that gates the "ready" UI state.
//!
//! Loading is asynchronous and completes independently of the tick loop.
//! Nothing in the core waits on an asset: a failed load is logged, the
//! scene continues without it, and the barrier still resolves.

pub mod loader;
pub mod registry;

pub use loader::{LoadSet, LoadToken};
pub use registry::{AssetError, AssetId, AssetStore, ModelInfo};
