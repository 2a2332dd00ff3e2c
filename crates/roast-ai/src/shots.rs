//! Best-effort shot planning.

use tracing::debug;

use roast_models::{AspectRatio, EnergyMode, ShotPlan};

use crate::client::TextGenClient;
use crate::error::{AiError, AiResult};
use crate::parse::parse_shot_plan;
use crate::prompt::shot_plan_prompt;

/// Converts script lines into a timed shot breakdown plus one video prompt.
///
/// Callers must treat any failure as "no shot plan available"; planning never
/// gates the pipeline.
#[derive(Clone)]
pub struct ShotPlanner {
    client: TextGenClient,
}

impl ShotPlanner {
    /// Create a new planner over a text-generation client.
    pub fn new(client: TextGenClient) -> Self {
        Self { client }
    }

    /// Plan shots for a script.
    pub async fn plan(
        &self,
        lines: &[String],
        aspect: AspectRatio,
        target_seconds: u32,
        energy: EnergyMode,
    ) -> AiResult<ShotPlan> {
        let prompt = shot_plan_prompt(lines, aspect, target_seconds, energy);
        let raw = self.client.complete(&prompt).await?;

        let plan = parse_shot_plan(&raw)
            .ok_or_else(|| AiError::invalid_response("unusable shot plan"))?;

        debug!(shots = plan.shots.len(), "Shot plan generated");
        Ok(plan)
    }
}
