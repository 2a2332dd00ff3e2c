//! Shared data models for RoastClip backend.
//!
//! This crate provides Serde-serializable types for:
//! - Roast requests and their normalization rules
//! - Content fingerprints (cache keys + derived seeds)
//! - Word budgets and the shared word tokenizer
//! - Script, shot-plan, and cached-artifact payloads

pub mod artifact;
pub mod budget;
pub mod fingerprint;
pub mod output;
pub mod request;
pub mod script;

// Re-export common types
pub use artifact::CachedArtifact;
pub use budget::{total_words, word_count, Budget};
pub use fingerprint::Fingerprint;
pub use output::RoastOutput;
pub use request::{EnergyMode, RoastRequest, ValidationError};
pub use script::{AspectRatio, ScriptResult, Shot, ShotPlan};
