//! Video-generation HTTP client.
//!
//! Implements the create-job / poll-until-terminal / download protocol. The
//! poll loop has a hard wall-clock ceiling; exceeding it cancels only the
//! local wait, never the provider-side job.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{VideoError, VideoResult};
use crate::types::{JobStatus, VideoJob};

/// Configuration for the video-generation client.
#[derive(Debug, Clone)]
pub struct VideoGenConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Interval between job polls
    pub poll_interval: Duration,
    /// Hard ceiling on total poll wait
    pub max_wait: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl VideoGenConfig {
    /// Create config from environment variables.
    pub fn from_env() -> VideoResult<Self> {
        Ok(Self {
            base_url: std::env::var("VIDEO_GEN_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("VIDEO_GEN_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .map_err(|_| VideoError::not_configured("VIDEO_GEN_API_KEY not set"))?,
            model: std::env::var("VIDEO_GEN_MODEL").unwrap_or_else(|_| "sora-2".to_string()),
            poll_interval: Duration::from_secs(
                std::env::var("VIDEO_GEN_POLL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_wait: Duration::from_secs(
                std::env::var("VIDEO_GEN_MAX_WAIT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            timeout: Duration::from_secs(
                std::env::var("VIDEO_GEN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        })
    }
}

#[derive(Serialize)]
struct CreateJobRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    seconds: u32,
    size: &'a str,
    seed: u32,
}

/// Client for the external video-generation service.
#[derive(Clone)]
pub struct VideoGenClient {
    http: Client,
    config: VideoGenConfig,
}

impl VideoGenClient {
    /// Create a new client.
    pub fn new(config: VideoGenConfig) -> VideoResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VideoError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> VideoResult<Self> {
        Self::new(VideoGenConfig::from_env()?)
    }

    /// Create a generation job.
    pub async fn create_job(
        &self,
        prompt: &str,
        seconds: u32,
        size: &str,
        seed: u32,
    ) -> VideoResult<VideoJob> {
        let url = format!("{}/videos", self.config.base_url);

        let request = CreateJobRequest {
            model: &self.config.model,
            prompt,
            seconds,
            size,
            seed,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        self.decode_job(response, "create").await
    }

    /// Fetch current job state.
    pub async fn get_job(&self, job_id: &str) -> VideoResult<VideoJob> {
        let url = format!("{}/videos/{}", self.config.base_url, job_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        self.decode_job(response, "get").await
    }

    /// Download the rendered video for a completed job.
    pub async fn download(&self, job_id: &str) -> VideoResult<Vec<u8>> {
        let url = format!("{}/videos/{}/content", self.config.base_url, job_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(VideoError::request_failed(format!(
                "video download returned {}",
                status
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Run the full protocol: create, poll until terminal, download.
    pub async fn generate(
        &self,
        prompt: &str,
        seconds: u32,
        size: &str,
        seed: u32,
    ) -> VideoResult<Vec<u8>> {
        let mut job = self.create_job(prompt, seconds, size, seed).await?;
        info!(job_id = %job.id, "Video job created");

        let started = tokio::time::Instant::now();

        while !job.status.is_terminal() {
            if started.elapsed() >= self.config.max_wait {
                return Err(VideoError::Timeout(self.config.max_wait.as_secs()));
            }

            tokio::time::sleep(self.config.poll_interval).await;
            job = self.get_job(&job.id).await?;

            debug!(job_id = %job.id, status = ?job.status, progress = ?job.progress, "Video job polled");
        }

        if job.status == JobStatus::Failed {
            return Err(VideoError::job_failed(job.failure_message()));
        }

        self.download(&job.id).await
    }

    async fn decode_job(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> VideoResult<VideoJob> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VideoError::request_failed(format!(
                "video job {} returned {}: {}",
                operation, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VideoError::invalid_response(format!("bad job payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> VideoGenConfig {
        VideoGenConfig {
            base_url,
            api_key: "test-key".to_string(),
            model: "sora-2".to_string(),
            poll_interval: Duration::from_millis(10),
            max_wait: Duration::from_millis(200),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_generate_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(body_partial_json(serde_json::json!({
                "model": "sora-2",
                "seconds": 12,
                "seed": 7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_1",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos/job_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_1",
                "status": "completed",
                "progress": 100
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos/job_1/content"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4 bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client = VideoGenClient::new(config(server.uri())).unwrap();
        let bytes = client.generate("a lab", 12, "720x1280", 7).await.unwrap();
        assert_eq!(bytes, b"mp4 bytes");
    }

    #[tokio::test]
    async fn test_generate_surfaces_provider_failure_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_2",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos/job_2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_2",
                "status": "failed",
                "error": {"message": "content policy violation"}
            })))
            .mount(&server)
            .await;

        let client = VideoGenClient::new(config(server.uri())).unwrap();
        let err = client.generate("a lab", 12, "720x1280", 7).await.unwrap_err();

        assert!(matches!(err, VideoError::JobFailed(_)));
        assert!(err.to_string().contains("content policy violation"));
    }

    #[tokio::test]
    async fn test_generate_times_out_on_stuck_job() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_3",
                "status": "queued"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/videos/job_3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "job_3",
                "status": "in_progress"
            })))
            .mount(&server)
            .await;

        let client = VideoGenClient::new(config(server.uri())).unwrap();
        let err = client.generate("a lab", 12, "720x1280", 7).await.unwrap_err();

        assert!(matches!(err, VideoError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_create_job_surfaces_api_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad prompt"))
            .mount(&server)
            .await;

        let client = VideoGenClient::new(config(server.uri())).unwrap();
        let err = client.create_job("a lab", 12, "720x1280", 7).await.unwrap_err();

        assert!(matches!(err, VideoError::RequestFailed(_)));
        assert!(err.to_string().contains("400"));
    }
}
