//! Roast generation pipeline.
//!
//! Ties the models, AI clients, subtitle synthesis, video acquisition, and
//! artifact store together into one cache-aware [`RoastPipeline`].

pub mod error;
pub mod pipeline;
pub mod retry;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::RoastPipeline;
pub use retry::with_retry;
