//! Prompt construction.
//!
//! Prompts are built as `PromptSpec` values (system instructions, user
//! instructions, output schema, sampling knobs) so the contract sent to the
//! text generator can be asserted on in tests independently of wording.

use roast_models::{AspectRatio, Budget, EnergyMode, RoastRequest, ScriptResult};

/// Maximum caption length accepted from the generator.
pub const CAPTION_MAX_CHARS: usize = 160;

/// A fully assembled instruction object for one completion call.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    /// System instructions
    pub system: String,
    /// User instructions
    pub user: String,
    /// Name of the structured-output schema
    pub schema_name: &'static str,
    /// JSON schema the response must match
    pub schema: serde_json::Value,
    /// Sampling temperature
    pub temperature: f64,
    /// Completion token cap
    pub max_tokens: u32,
}

fn script_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["lines", "caption"],
        "properties": {
            "lines": {
                "type": "array",
                "items": { "type": "string" }
            },
            "caption": {
                "type": "string",
                "maxLength": CAPTION_MAX_CHARS
            }
        },
        "additionalProperties": false
    })
}

fn script_system_prompt(budget: &Budget, target_seconds: u32) -> String {
    [
        "You are Albert Einstein hosting a high-energy roast of startup ideas.".to_string(),
        "Stay playful and sharp, but never mean.".to_string(),
        "Roast the idea, positioning, or market angle, never the person.".to_string(),
        "Structure the script as five beats, one line each, in this order: Hook, Twist, Punchline, Tag, Button.".to_string(),
        "Each line should be 8-12 words, punchy, safe for work.".to_string(),
        "No slurs, no defamation, no personal data, no profanity stronger than mild TV-PG.".to_string(),
        format!(
            "Hard limits: at most {} words total, targeting {} seconds at {} words per second.",
            budget.max_words, target_seconds, budget.words_per_second
        ),
        format!(
            "Reply with JSON exactly like {{\"lines\": [string], \"caption\": string}} where caption is at most {} characters.",
            CAPTION_MAX_CHARS
        ),
    ]
    .join("\n")
}

/// Build the first-pass script prompt.
pub fn script_prompt(request: &RoastRequest, budget: &Budget) -> PromptSpec {
    let mut user_lines = vec![
        format!("Tweet ID: {}", request.tweet_id),
        format!("Startup: {}", request.startup_name),
        format!("Tweet Text:\n{}", request.tweet_text),
    ];

    if let Some(handle) = &request.author_handle {
        user_lines.push(format!("Author Handle: {}", handle));
    }

    if let Some(website) = &request.website {
        user_lines.push(format!("Website: {}", website));
    }

    if let Some(angle) = &request.angle {
        user_lines.push(format!("Requested Angle: {}", angle));
    }

    user_lines.push(
        [
            "Constraints:",
            "- Keep it vivid, high energy, but brand-safe.",
            "- Make Einstein-themed references sparingly (speed of light, relativity).",
            "- Finish with a short caption that pairs with the roast video.",
        ]
        .join("\n"),
    );

    PromptSpec {
        system: script_system_prompt(budget, request.target_seconds),
        user: user_lines.join("\n\n"),
        schema_name: "roast_script",
        schema: script_schema(),
        temperature: 0.9,
        max_tokens: 600,
    }
}

/// Build the single compression pass for an over-budget draft.
pub fn compression_prompt(
    request: &RoastRequest,
    budget: &Budget,
    draft: &ScriptResult,
) -> PromptSpec {
    let user = format!(
        "This draft is over budget. Shorten it to at most {} words total \
         while preserving the voice and the Hook/Twist/Punchline/Tag/Button beat order. \
         Keep the same caption unless shortening improves it.\n\nDraft lines:\n{}\n\nDraft caption:\n{}",
        budget.max_words,
        draft.script_text(),
        draft.caption
    );

    PromptSpec {
        system: script_system_prompt(budget, request.target_seconds),
        user,
        schema_name: "roast_script_compressed",
        schema: script_schema(),
        temperature: 0.9,
        max_tokens: 600,
    }
}

/// Build the shot-plan prompt.
pub fn shot_plan_prompt(
    lines: &[String],
    aspect: AspectRatio,
    target_seconds: u32,
    energy: EnergyMode,
) -> PromptSpec {
    let system = [
        "You convert a short script into a 4-6 shot plan for a meme-style vertical video",
        "with an Einstein-like presenter in a chalkboard lab. No real logos or faces.",
        "Output JSON: {\"shots\": [{\"dur\": number, \"visual\": string, \"action\": string, \"onscreen_text\": string, \"sfx\": string}], \"video_prompt\": string}",
    ]
    .join("\n");

    let user = format!(
        "Script lines:\n{}\n\nEnergy: {}\nAspect: {}\nTotal duration target: {}s\n\n\
         Rules:\n\
         - Allocate durations that sum to {}s.\n\
         - Dynamic cuts, quick push-ins, chalk scribbles appearing, meme captions.\n\
         - Onscreen text is at most 6 words, big, uppercased, for each beat.\n\
         - \"video_prompt\" must be a single coherent description including camera, setting,\n  \
         lighting, motion, and that the actor speaks the script with energetic delivery.",
        serde_json::to_string(lines).unwrap_or_default(),
        energy.as_str(),
        aspect.as_str(),
        target_seconds,
        target_seconds
    );

    PromptSpec {
        system,
        user,
        schema_name: "shot_plan",
        schema: serde_json::json!({
            "type": "object",
            "required": ["shots", "video_prompt"],
            "properties": {
                "shots": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["dur", "visual", "action", "onscreen_text", "sfx"],
                        "properties": {
                            "dur": { "type": "number" },
                            "visual": { "type": "string" },
                            "action": { "type": "string" },
                            "onscreen_text": { "type": "string" },
                            "sfx": { "type": "string" }
                        }
                    }
                },
                "video_prompt": { "type": "string" }
            },
            "additionalProperties": false
        }),
        temperature: 0.7,
        max_tokens: 800,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roast_models::EnergyMode;

    fn request() -> RoastRequest {
        RoastRequest {
            tweet_id: "1".to_string(),
            startup_name: "Lightcone Labs".to_string(),
            tweet_text: "AI toasters".to_string(),
            author_handle: None,
            website: Some("https://example.com".to_string()),
            angle: None,
            target_seconds: 12,
            energy_mode: EnergyMode::Hyper,
        }
    }

    #[test]
    fn test_script_prompt_carries_numeric_constraints() {
        let budget = Budget::compute(12, EnergyMode::Hyper);
        let prompt = script_prompt(&request(), &budget);

        assert!(prompt.system.contains("at most 36 words"));
        assert!(prompt.system.contains("12 seconds"));
        assert!(prompt.system.contains("Hook, Twist, Punchline, Tag, Button"));
        assert_eq!(prompt.schema_name, "roast_script");
        assert_eq!(prompt.schema["required"][0], "lines");
    }

    #[test]
    fn test_script_prompt_includes_optional_fields_only_when_present() {
        let budget = Budget::compute(12, EnergyMode::Hyper);
        let prompt = script_prompt(&request(), &budget);

        assert!(prompt.user.contains("Website: https://example.com"));
        assert!(!prompt.user.contains("Author Handle"));
        assert!(!prompt.user.contains("Requested Angle"));
    }

    #[test]
    fn test_compression_prompt_embeds_draft() {
        let budget = Budget::compute(12, EnergyMode::Hyper);
        let draft = ScriptResult {
            lines: vec!["a very long opening line".to_string()],
            caption: "cap".to_string(),
        };
        let prompt = compression_prompt(&request(), &budget, &draft);

        assert!(prompt.user.contains("a very long opening line"));
        assert!(prompt.user.contains("at most 36 words"));
    }

    #[test]
    fn test_shot_plan_prompt_sums_to_target() {
        let lines = vec!["one".to_string(), "two".to_string()];
        let prompt = shot_plan_prompt(&lines, AspectRatio::Portrait, 15, EnergyMode::Normal);

        assert!(prompt.user.contains("sum to 15s"));
        assert!(prompt.user.contains("Aspect: 9:16"));
        assert!(prompt.user.contains("Energy: NORMAL"));
        assert_eq!(prompt.schema_name, "shot_plan");
    }
}
