//! Script and shot-plan payloads.

use serde::{Deserialize, Serialize};

/// Output aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    /// 9:16 vertical
    #[default]
    #[serde(rename = "9:16")]
    Portrait,
    /// 16:9 horizontal
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
        }
    }

    /// Pixel size passed to the video generator (720p class).
    pub fn size(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "720x1280",
            AspectRatio::Landscape => "1280x720",
        }
    }
}

/// A generated roast script: ordered dialogue lines plus a social caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Dialogue lines, one beat per line
    pub lines: Vec<String>,

    /// Social caption pairing with the clip (<= 160 chars)
    pub caption: String,
}

impl ScriptResult {
    /// Full script text, one line per beat.
    pub fn script_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// One visual beat in a shot plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    /// Shot duration in seconds
    #[serde(rename = "dur")]
    pub duration: f64,

    /// Visual description
    pub visual: String,

    /// Action description
    pub action: String,

    /// On-screen text (<= 6 words, uppercased)
    pub onscreen_text: String,

    /// Sound-effect description
    pub sfx: String,
}

/// Timed shot breakdown plus a single descriptive prompt for video
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotPlan {
    /// Ordered shots; durations are instructed to sum to the target length
    pub shots: Vec<Shot>,

    /// Single coherent prompt for the video generator
    pub video_prompt: String,
}
