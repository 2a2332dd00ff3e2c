//! Roast generation pipeline.
//!
//! Orchestrates one request end to end: normalize, fingerprint, cache
//! lookup, script generation, subtitle synthesis, best-effort shot planning,
//! video acquisition, and persistence. Identical creative inputs short-
//! circuit to the cached artifact without touching any external service.

use chrono::Utc;
use std::time::Duration;
use tracing::{error, info, warn};

use roast_ai::{ScriptGenerator, ShotPlanner, TextGenClient};
use roast_media::srt_from_lines;
use roast_models::{
    AspectRatio, Budget, CachedArtifact, Fingerprint, RoastOutput, RoastRequest, ShotPlan,
};
use roast_storage::ArtifactStore;
use roast_video::VideoAcquirer;

use crate::error::PipelineResult;
use crate::retry::with_retry;

const SCRIPT_ATTEMPTS: u32 = 3;
const SCRIPT_BASE_DELAY: Duration = Duration::from_millis(600);
const VIDEO_ATTEMPTS: u32 = 2;
const VIDEO_BASE_DELAY: Duration = Duration::from_millis(800);

/// End-to-end roast pipeline.
#[derive(Clone)]
pub struct RoastPipeline {
    store: ArtifactStore,
    scripts: ScriptGenerator,
    shots: ShotPlanner,
    video: VideoAcquirer,
}

impl RoastPipeline {
    /// Assemble a pipeline from its components.
    pub fn new(
        store: ArtifactStore,
        scripts: ScriptGenerator,
        shots: ShotPlanner,
        video: VideoAcquirer,
    ) -> Self {
        Self {
            store,
            scripts,
            shots,
            video,
        }
    }

    /// Assemble from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let text_client = TextGenClient::from_env()?;

        Ok(Self::new(
            ArtifactStore::from_env(),
            ScriptGenerator::new(text_client.clone()),
            ShotPlanner::new(text_client),
            VideoAcquirer::from_env()?,
        ))
    }

    /// Run one roast request to completion.
    pub async fn run(&self, request: RoastRequest) -> PipelineResult<RoastOutput> {
        let request = request.normalize()?;

        let fingerprint = Fingerprint::compute(&request);
        let seed = fingerprint.seed();
        let budget = Budget::compute(request.target_seconds, request.energy_mode);

        if let Some(artifact) = self.store.read_artifact(&fingerprint).await {
            info!(fingerprint = %fingerprint, tweet_id = %request.tweet_id, "Cache hit");
            return Ok(cached_output(&request, &budget, artifact));
        }

        info!(
            fingerprint = %fingerprint,
            tweet_id = %request.tweet_id,
            seed,
            max_words = budget.max_words,
            "Cache miss, generating roast"
        );

        let script = with_retry("script", SCRIPT_ATTEMPTS, SCRIPT_BASE_DELAY, |_| {
            self.scripts.generate(&request)
        })
        .await?;

        let srt = srt_from_lines(&script.lines, budget.words_per_second);
        let script_text = script.script_text();

        let shot_plan = self.plan_shots(&request, &script.lines).await;
        let video_prompt = shot_plan.map(|p| p.video_prompt);

        let video = self
            .acquire_video(&script_text, seed, video_prompt.as_deref(), &request)
            .await?;

        let video_url = self.store.save_video(&video.bytes, &fingerprint).await?;

        let artifact = CachedArtifact {
            fingerprint: fingerprint.clone(),
            script: script_text.clone(),
            caption: script.caption.clone(),
            duration_seconds: video.duration_seconds,
            video_url: video_url.clone(),
            srt: srt.clone(),
            video_prompt: video_prompt.clone(),
            created_at: Utc::now(),
        };

        // The artifact is a cache entry; failing to persist it costs a future
        // regeneration, not this response.
        if let Err(e) = self.store.write_artifact(&artifact).await {
            error!(fingerprint = %fingerprint, "Artifact persist failed: {}", e);
        }

        Ok(RoastOutput {
            tweet_id: request.tweet_id,
            script: script_text,
            script_lines: script.lines,
            caption: script.caption,
            video_url,
            fingerprint,
            duration_seconds: video.duration_seconds,
            words_per_second: budget.words_per_second,
            max_words: budget.max_words,
            srt,
            video_prompt,
            from_cache: false,
        })
    }

    /// Delete every cached artifact and blob. Returns the number of files
    /// removed.
    pub async fn clear_cache(&self) -> PipelineResult<u64> {
        Ok(self.store.clear_all().await?)
    }

    /// Shot planning never gates the pipeline; any failure yields no plan.
    async fn plan_shots(&self, request: &RoastRequest, lines: &[String]) -> Option<ShotPlan> {
        match self
            .shots
            .plan(
                lines,
                AspectRatio::default(),
                request.target_seconds,
                request.energy_mode,
            )
            .await
        {
            Ok(plan) => Some(plan),
            Err(e) => {
                warn!(tweet_id = %request.tweet_id, "Shot planning failed, continuing without: {}", e);
                None
            }
        }
    }

    /// Acquire video bytes, degrading to the fallback clip when external
    /// generation keeps failing.
    async fn acquire_video(
        &self,
        script_text: &str,
        seed: u32,
        video_prompt: Option<&str>,
        request: &RoastRequest,
    ) -> PipelineResult<roast_video::AcquiredVideo> {
        let attempt = with_retry("video", VIDEO_ATTEMPTS, VIDEO_BASE_DELAY, |_| {
            self.video.acquire(
                script_text,
                seed,
                video_prompt,
                request.target_seconds,
                AspectRatio::default(),
            )
        })
        .await;

        match attempt {
            Ok(video) => Ok(video),
            Err(e) => {
                warn!(tweet_id = %request.tweet_id, "Video generation exhausted retries, using fallback clip: {}", e);
                Ok(self.video.fallback(request.target_seconds))
            }
        }
    }
}

fn cached_output(request: &RoastRequest, budget: &Budget, artifact: CachedArtifact) -> RoastOutput {
    RoastOutput {
        tweet_id: request.tweet_id.clone(),
        script_lines: artifact.script_lines(),
        script: artifact.script,
        caption: artifact.caption,
        video_url: artifact.video_url,
        fingerprint: artifact.fingerprint,
        duration_seconds: artifact.duration_seconds,
        words_per_second: budget.words_per_second,
        max_words: budget.max_words,
        srt: artifact.srt,
        video_prompt: artifact.video_prompt,
        from_cache: true,
    }
}
