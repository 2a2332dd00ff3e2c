//! Text-generation adapters for RoastClip.
//!
//! This crate provides:
//! - An OpenAI-style chat-completions client
//! - Prompt construction as testable instruction objects
//! - Fail-closed normalization of provider output
//! - The two-pass budget-constrained script generator
//! - Best-effort shot planning

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod script;
pub mod shots;

pub use client::{TextGenClient, TextGenConfig};
pub use error::{AiError, AiResult};
pub use parse::{fallback_script, parse_script_response, parse_shot_plan};
pub use prompt::{script_prompt, shot_plan_prompt, PromptSpec, CAPTION_MAX_CHARS};
pub use script::ScriptGenerator;
pub use shots::ShotPlanner;
