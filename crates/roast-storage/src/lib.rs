//! Fingerprint-keyed artifact store.
//!
//! This crate provides:
//! - Write-once cached artifacts (metadata JSON) per fingerprint
//! - Video blob storage and validated retrieval
//! - Atomic metadata writes, read-failure-as-miss semantics
//! - Administrative cache clearing

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{video_file_name, ArtifactStore, StoreConfig};
