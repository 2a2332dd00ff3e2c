//! Deterministic subtitle synthesis.
//!
//! This crate provides:
//! - Per-line caption timing from a words-per-second rate
//! - SRT rendering with `HH:MM:SS,mmm` timecodes

pub mod subtitle;

pub use subtitle::{render_srt, srt_from_lines, synthesize, SubtitleBlock};
