//! Video generation job types.

use serde::{Deserialize, Serialize};

/// Job state reported by the video generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Provider-reported error payload on a failed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobError {
    #[serde(default)]
    pub message: Option<String>,
}

/// One video generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJob {
    /// Provider job ID
    pub id: String,

    /// Current state
    pub status: JobStatus,

    /// Completion percentage, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,

    /// Failure detail, present on failed jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
}

impl VideoJob {
    /// Provider failure message, with a generic fallback.
    pub fn failure_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| format!("video job ended with status {:?}", self.status))
    }
}

/// Raw video bytes plus the clip duration they represent.
#[derive(Debug, Clone)]
pub struct AcquiredVideo {
    pub bytes: Vec<u8>,
    pub duration_seconds: u32,
}
