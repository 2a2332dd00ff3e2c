//! Subtitle block synthesis and SRT rendering.
//!
//! Timing is computed in integer milliseconds so repeated runs are
//! bit-identical. Per line: duration = max(0.8s, word count / rate rounded up
//! to the next 0.1s). Blocks sit back-to-back with a fixed 0.05s gap.

use serde::{Deserialize, Serialize};

use roast_models::word_count;

/// Floor so one-word lines stay legible.
const MIN_BLOCK_MS: u64 = 800;

/// Fixed silence between consecutive blocks.
const BLOCK_GAP_MS: u64 = 50;

/// One timed caption block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleBlock {
    /// 1-based index
    pub index: u32,

    /// Start time in milliseconds
    pub start_ms: u64,

    /// End time in milliseconds (always > start_ms)
    pub end_ms: u64,

    /// Caption text, one script line
    pub text: String,
}

impl SubtitleBlock {
    /// Start time in seconds.
    pub fn start_seconds(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    /// End time in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.end_ms as f64 / 1000.0
    }
}

/// Convert script lines into timed caption blocks.
pub fn synthesize(lines: &[String], words_per_second: f64) -> Vec<SubtitleBlock> {
    let mut cursor_ms: u64 = 0;
    let mut blocks = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let words = word_count(line);
        let tenths = ((words as f64 / words_per_second) * 10.0).ceil().max(0.0) as u64;
        let duration_ms = (tenths * 100).max(MIN_BLOCK_MS);

        let start_ms = cursor_ms;
        let end_ms = start_ms + duration_ms;
        cursor_ms = end_ms + BLOCK_GAP_MS;

        blocks.push(SubtitleBlock {
            index: idx as u32 + 1,
            start_ms,
            end_ms,
            text: line.clone(),
        });
    }

    blocks
}

/// Render blocks to SRT text.
pub fn render_srt(blocks: &[SubtitleBlock]) -> String {
    let rendered: Vec<String> = blocks
        .iter()
        .map(|b| {
            format!(
                "{}\n{} --> {}\n{}\n",
                b.index,
                format_timecode(b.start_ms),
                format_timecode(b.end_ms),
                b.text
            )
        })
        .collect();

    rendered.join("\n")
}

/// Synthesize and render in one step.
pub fn srt_from_lines(lines: &[String], words_per_second: f64) -> String {
    render_srt(&synthesize(lines, words_per_second))
}

/// Format milliseconds as an SRT timecode: `HH:MM:SS,mmm`.
fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}
