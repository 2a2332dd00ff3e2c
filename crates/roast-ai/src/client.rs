//! Text-generation HTTP client.
//!
//! Speaks an OpenAI-style chat-completions wire shape. The client returns the
//! raw model text; shaping that text into domain types (and failing closed on
//! malformed content) is the adapter layer's job in `parse`.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AiError, AiResult};
use crate::prompt::PromptSpec;

/// Configuration for the text-generation client.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    /// API base URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl TextGenConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Ok(Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("OPENAI_API_KEY")
                .map_err(|_| AiError::not_configured("OPENAI_API_KEY not set"))?,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the external text-generation service.
#[derive(Clone)]
pub struct TextGenClient {
    http: Client,
    config: TextGenConfig,
}

impl TextGenClient {
    /// Create a new client.
    pub fn new(config: TextGenConfig) -> AiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(TextGenConfig::from_env()?)
    }

    /// Run one completion and return the raw model text.
    ///
    /// Transport and API-level failures are errors; an empty or missing
    /// message body is returned as an empty string and left to the defensive
    /// parsers downstream.
    pub async fn complete(&self, prompt: &PromptSpec) -> AiResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!(schema = prompt.schema_name, "Sending completion request");

        let request = ChatRequest {
            model: &self.config.model,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: prompt.schema_name,
                    schema: &prompt.schema,
                    strict: true,
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(AiError::Network)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::request_failed(format!(
                "text generator returned {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::invalid_response(format!("bad completion envelope: {}", e)))?;

        Ok(chat
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptSpec;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> TextGenConfig {
        TextGenConfig {
            base_url,
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn prompt() -> PromptSpec {
        PromptSpec {
            system: "system".to_string(),
            user: "user".to_string(),
            schema_name: "test_schema",
            schema: serde_json::json!({"type": "object"}),
            temperature: 0.9,
            max_tokens: 600,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_message_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "{\"ok\":true}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TextGenClient::new(config(server.uri())).unwrap();
        let raw = client.complete(&prompt()).await.unwrap();
        assert_eq!(raw, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_complete_empty_choices_yields_empty_string() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let client = TextGenClient::new(config(server.uri())).unwrap();
        assert_eq!(client.complete(&prompt()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = TextGenClient::new(config(server.uri())).unwrap();
        let err = client.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, AiError::RequestFailed(_)));
        assert!(err.to_string().contains("429"));
    }
}
