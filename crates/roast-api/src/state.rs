//! Application state.

use std::sync::Arc;

use roast_pipeline::{PipelineResult, RoastPipeline};
use roast_storage::ArtifactStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<RoastPipeline>,
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    /// Create new application state from environment variables.
    pub fn new(config: ApiConfig) -> PipelineResult<Self> {
        Ok(Self {
            config,
            pipeline: Arc::new(RoastPipeline::from_env()?),
            store: Arc::new(ArtifactStore::from_env()),
        })
    }

    /// Assemble state from prebuilt components.
    pub fn with_components(
        config: ApiConfig,
        pipeline: RoastPipeline,
        store: ArtifactStore,
    ) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
            store: Arc::new(store),
        }
    }
}
