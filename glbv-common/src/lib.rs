//! # GLB Visualizer Common Library
//!
//! Shared code for the scene API and the maintenance tools:
//! - Asset directory convention and tree walkers
//! - Metadata record and `metadata.yaml` store accessor
//! - Projection materializer (scene / frame / pose symlinks)
//! - Lifecycle sweeper for assets flagged `status: delete`
//! - Configuration loading and logging bootstrap

pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod metadata;
pub mod projection;
pub mod sweeper;

pub use error::{Error, Result};
pub use layout::VideoAsset;
pub use metadata::{Status, VideoMetadata};
pub use projection::ArtifactKind;
