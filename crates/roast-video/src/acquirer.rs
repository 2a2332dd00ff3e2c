//! Video acquisition.
//!
//! Resolves a script, a seed, and an optional shot-plan prompt to raw video
//! bytes. External mode runs the job protocol and its errors propagate so the
//! caller's retry policy can re-attempt the acquisition from scratch; the
//! fallback clip is infallible and is also what disabled mode serves.

use tracing::info;

use roast_models::AspectRatio;

use crate::client::{VideoGenClient, VideoGenConfig};
use crate::error::VideoResult;
use crate::fallback::fallback_video_bytes;
use crate::types::AcquiredVideo;

/// Configuration for the acquirer.
#[derive(Debug, Clone)]
pub struct AcquirerConfig {
    /// Whether the external video generator is used at all
    pub external_enabled: bool,
}

impl AcquirerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            external_enabled: std::env::var("VIDEO_GEN_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Acquires video bytes for a generated script.
#[derive(Clone)]
pub struct VideoAcquirer {
    client: Option<VideoGenClient>,
}

impl VideoAcquirer {
    /// Create an acquirer; `client` is `None` when external mode is disabled.
    pub fn new(client: Option<VideoGenClient>) -> Self {
        Self { client }
    }

    /// Create from environment variables.
    pub fn from_env() -> VideoResult<Self> {
        let config = AcquirerConfig::from_env();
        let client = if config.external_enabled {
            Some(VideoGenClient::new(VideoGenConfig::from_env()?))
        } else {
            None
        }
        .transpose()?;

        Ok(Self::new(client))
    }

    /// Acquire a clip.
    ///
    /// External failures propagate; callers retry and then fall back via
    /// [`VideoAcquirer::fallback`].
    pub async fn acquire(
        &self,
        script: &str,
        seed: u32,
        video_prompt: Option<&str>,
        target_seconds: u32,
        aspect: AspectRatio,
    ) -> VideoResult<AcquiredVideo> {
        let Some(client) = &self.client else {
            return Ok(self.fallback(target_seconds));
        };

        let prompt = match video_prompt {
            Some(prompt) => prompt.to_string(),
            None => default_video_prompt(script),
        };

        let bytes = client
            .generate(&prompt, target_seconds, aspect.size(), seed)
            .await?;

        info!(size = bytes.len(), "Video generated externally");

        Ok(AcquiredVideo {
            bytes,
            duration_seconds: target_seconds,
        })
    }

    /// Serve the fallback clip. Never fails.
    pub fn fallback(&self, target_seconds: u32) -> AcquiredVideo {
        AcquiredVideo {
            bytes: fallback_video_bytes().to_vec(),
            duration_seconds: target_seconds,
        }
    }

    /// Whether external generation is configured.
    pub fn external_enabled(&self) -> bool {
        self.client.is_some()
    }
}

/// Prompt used when no shot plan is available.
fn default_video_prompt(script: &str) -> String {
    format!(
        "An Einstein-like presenter in a chalkboard lab delivers this script \
         with energetic meme-style delivery, dynamic cuts and chalk scribbles:\n{}",
        script
    )
}
