//! Pipeline error types.

use thiserror::Error;

use roast_models::ValidationError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Script generation failed: {0}")]
    Ai(#[from] roast_ai::AiError),

    #[error("Video acquisition failed: {0}")]
    Video(#[from] roast_video::VideoError),

    #[error("Storage error: {0}")]
    Storage(#[from] roast_storage::StorageError),
}

impl PipelineError {
    /// Whether the error is the caller's fault rather than the service's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
