//! Cached artifact bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// The full cached output bundle for one fingerprint.
///
/// Created on the first successful pipeline run and immutable thereafter;
/// reads short-circuit regeneration, so a second write for the same
/// fingerprint is never issued by a cache-hitting caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedArtifact {
    /// Cache key this artifact is stored under
    pub fingerprint: Fingerprint,

    /// Full script text, one line per beat
    pub script: String,

    /// Social caption
    pub caption: String,

    /// Clip duration in seconds
    pub duration_seconds: u32,

    /// Serving URL of the stored video blob
    pub video_url: String,

    /// Rendered SRT subtitle text
    pub srt: String,

    /// Shot-plan prompt, when planning succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_prompt: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CachedArtifact {
    /// Script lines recovered from the stored script text.
    pub fn script_lines(&self) -> Vec<String> {
        self.script
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_lines_skips_blank_lines() {
        let artifact = CachedArtifact {
            fingerprint: Fingerprint::parse(&"a".repeat(64)).unwrap(),
            script: "Hook\n\nPunchline\n".to_string(),
            caption: "c".to_string(),
            duration_seconds: 12,
            video_url: "/roasts/x.mp4".to_string(),
            srt: String::new(),
            video_prompt: None,
            created_at: Utc::now(),
        };
        assert_eq!(artifact.script_lines(), vec!["Hook", "Punchline"]);
    }
}
