//! Budget-constrained script generation.
//!
//! Two-pass protocol: generate a draft, and if it overshoots the word budget,
//! issue exactly one compression pass and return its result unconditionally.
//! The budget is best-effort; a usable-but-slightly-long script beats a hard
//! failure.

use tracing::{debug, info};

use roast_models::{total_words, Budget, RoastRequest, ScriptResult};

use crate::client::TextGenClient;
use crate::error::AiResult;
use crate::parse::parse_script_response;
use crate::prompt::{compression_prompt, script_prompt};

/// Generates roast scripts within a word budget.
#[derive(Clone)]
pub struct ScriptGenerator {
    client: TextGenClient,
}

impl ScriptGenerator {
    /// Create a new generator over a text-generation client.
    pub fn new(client: TextGenClient) -> Self {
        Self { client }
    }

    /// Generate a script for the request.
    ///
    /// Only transport/API failures surface as errors; malformed model output
    /// is replaced by the default script inside the parser.
    pub async fn generate(&self, request: &RoastRequest) -> AiResult<ScriptResult> {
        let budget = Budget::compute(request.target_seconds, request.energy_mode);

        let raw = self.client.complete(&script_prompt(request, &budget)).await?;
        let draft = parse_script_response(&raw);

        let words = total_words(&draft.lines);
        if words <= budget.max_words {
            debug!(words, max_words = budget.max_words, "Draft within budget");
            return Ok(draft);
        }

        info!(
            words,
            max_words = budget.max_words,
            "Draft over budget, running compression pass"
        );

        let raw = self
            .client
            .complete(&compression_prompt(request, &budget, &draft))
            .await?;

        // One compression pass only; its result is returned even if it still
        // overshoots.
        Ok(parse_script_response(&raw))
    }
}
