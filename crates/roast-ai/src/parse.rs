//! Provider response normalization.
//!
//! The text generator has returned several shapes over time: clean JSON,
//! JSON wrapped in markdown fences, and free text. Everything here fails
//! closed: a script parse that cannot recover yields the fixed default
//! script, and a shot-plan parse that cannot recover yields `None`.

use serde::Deserialize;
use tracing::warn;

use roast_models::{ScriptResult, ShotPlan};

use crate::prompt::CAPTION_MAX_CHARS;

#[derive(Deserialize)]
struct ScriptPayload {
    #[serde(default)]
    lines: Vec<String>,
    #[serde(default)]
    caption: String,
}

/// The safe single-line script used when model output is unusable.
pub fn fallback_script() -> ScriptResult {
    ScriptResult {
        lines: vec![
            "This pitch bent spacetime so hard even my equations gave up.".to_string(),
        ],
        caption: "Relatively speaking, this roast wrote itself.".to_string(),
    }
}

/// Pull a JSON object out of raw model text.
///
/// Strips markdown code fences and trims to the outermost braces.
fn extract_json(raw: &str) -> Option<&str> {
    let text = raw.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalize a script completion into a `ScriptResult`.
///
/// Malformed output never becomes an error; the fixed default script is
/// substituted instead.
pub fn parse_script_response(raw: &str) -> ScriptResult {
    let payload = extract_json(raw)
        .and_then(|json| serde_json::from_str::<ScriptPayload>(json).ok());

    let Some(payload) = payload else {
        warn!("Unusable script response, substituting default script");
        return fallback_script();
    };

    let lines: Vec<String> = payload
        .lines
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        warn!("Script response contained no usable lines, substituting default script");
        return fallback_script();
    }

    ScriptResult {
        lines,
        caption: clamp_caption(payload.caption.trim()),
    }
}

/// Normalize a shot-plan completion. Returns `None` when the output is
/// unusable; shot planning is best-effort and absence is not an error.
pub fn parse_shot_plan(raw: &str) -> Option<ShotPlan> {
    let plan: ShotPlan = extract_json(raw)
        .and_then(|json| serde_json::from_str(json).ok())?;

    if plan.shots.is_empty() || plan.video_prompt.trim().is_empty() {
        warn!("Shot plan response incomplete, discarding");
        return None;
    }

    Some(plan)
}

fn clamp_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_MAX_CHARS {
        return caption.to_string();
    }

    let truncated: String = caption.chars().take(CAPTION_MAX_CHARS - 3).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"lines": ["Hook line", "Punchline"], "caption": "zing"}"#;
        let script = parse_script_response(raw);
        assert_eq!(script.lines, vec!["Hook line", "Punchline"]);
        assert_eq!(script.caption, "zing");
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"lines\": [\"Hook\"], \"caption\": \"c\"}\n```";
        let script = parse_script_response(raw);
        assert_eq!(script.lines, vec!["Hook"]);
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let raw = "Here you go:\n{\"lines\": [\"Hook\"], \"caption\": \"c\"}\nEnjoy!";
        assert_eq!(parse_script_response(raw).lines, vec!["Hook"]);
    }

    #[test]
    fn test_garbage_yields_default_script() {
        let script = parse_script_response("I cannot help with that.");
        assert_eq!(script, fallback_script());
    }

    #[test]
    fn test_empty_lines_yield_default_script() {
        let raw = r#"{"lines": ["   ", ""], "caption": "c"}"#;
        assert_eq!(parse_script_response(raw), fallback_script());
    }

    #[test]
    fn test_blank_lines_are_filtered() {
        let raw = r#"{"lines": ["Hook", "  ", "Tag"], "caption": "c"}"#;
        assert_eq!(parse_script_response(raw).lines, vec!["Hook", "Tag"]);
    }

    #[test]
    fn test_long_caption_is_clamped() {
        let long = "x".repeat(400);
        let raw = format!(r#"{{"lines": ["Hook"], "caption": "{}"}}"#, long);
        let script = parse_script_response(&raw);
        assert_eq!(script.caption.chars().count(), 160);
        assert!(script.caption.ends_with("..."));
    }

    #[test]
    fn test_shot_plan_parses() {
        let raw = r#"{"shots": [{"dur": 3.0, "visual": "v", "action": "a", "onscreen_text": "BIG", "sfx": "boom"}], "video_prompt": "a lab"}"#;
        let plan = parse_shot_plan(raw).unwrap();
        assert_eq!(plan.shots.len(), 1);
        assert_eq!(plan.video_prompt, "a lab");
    }

    #[test]
    fn test_shot_plan_fails_closed() {
        assert!(parse_shot_plan("nope").is_none());
        assert!(parse_shot_plan(r#"{"shots": [], "video_prompt": "p"}"#).is_none());
        let no_prompt = r#"{"shots": [{"dur": 1.0, "visual": "v", "action": "a", "onscreen_text": "T", "sfx": "s"}], "video_prompt": " "}"#;
        assert!(parse_shot_plan(no_prompt).is_none());
    }
}
