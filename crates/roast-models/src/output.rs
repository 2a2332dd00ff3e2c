//! Pipeline success payload.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// Everything a successful roast run returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastOutput {
    /// Tweet the roast was requested for
    pub tweet_id: String,

    /// Full script text
    pub script: String,

    /// Script split into ordered lines
    pub script_lines: Vec<String>,

    /// Social caption
    pub caption: String,

    /// Serving URL of the video
    pub video_url: String,

    /// Cache key for this creative content
    pub fingerprint: Fingerprint,

    /// Clip duration in seconds
    pub duration_seconds: u32,

    /// Narration pace the subtitles were timed at
    pub words_per_second: f64,

    /// Word ceiling the script was budgeted against
    pub max_words: u32,

    /// Rendered SRT subtitle text
    pub srt: String,

    /// Shot-plan prompt, when planning succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,

    /// Whether this result was served from cache
    pub from_cache: bool,
}
