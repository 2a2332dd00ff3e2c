//! Video acquisition for roast clips.
//!
//! Wraps an external create/poll/download video-generation protocol behind
//! [`VideoAcquirer`], with an embedded fallback clip for disabled or
//! exhausted external generation.

pub mod acquirer;
pub mod client;
pub mod error;
pub mod fallback;
pub mod types;

pub use acquirer::{AcquirerConfig, VideoAcquirer};
pub use client::{VideoGenClient, VideoGenConfig};
pub use error::{VideoError, VideoResult};
pub use fallback::fallback_video_bytes;
pub use types::{AcquiredVideo, JobStatus, VideoJob};
