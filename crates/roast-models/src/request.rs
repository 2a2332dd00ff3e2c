//! Roast request model and normalization rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery-pace setting controlling words-per-second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyMode {
    #[default]
    Hyper,
    Normal,
}

impl EnergyMode {
    /// Narration pace for this mode.
    pub fn words_per_second(&self) -> f64 {
        match self {
            EnergyMode::Hyper => 3.0,
            EnergyMode::Normal => 2.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyMode::Hyper => "HYPER",
            EnergyMode::Normal => "NORMAL",
        }
    }
}

/// Request validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// A request to roast a startup pitched in a tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRequest {
    /// ID of the tweet that pitched the startup
    pub tweet_id: String,

    /// Startup name
    pub startup_name: String,

    /// Full tweet text
    pub tweet_text: String,

    /// Handle of the tweet author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_handle: Option<String>,

    /// Startup website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Requested roast angle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,

    /// Target clip length in seconds
    #[serde(default = "default_target_seconds")]
    pub target_seconds: u32,

    /// Delivery pace
    #[serde(default)]
    pub energy_mode: EnergyMode,
}

fn default_target_seconds() -> u32 {
    12
}

impl RoastRequest {
    /// Normalize the request: trim all fields, reject empty required fields,
    /// collapse blank optional fields to `None`.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        Ok(Self {
            tweet_id: require_field(self.tweet_id, "tweetId")?,
            startup_name: require_field(self.startup_name, "startupName")?,
            tweet_text: require_field(self.tweet_text, "tweetText")?,
            author_handle: trim_optional(self.author_handle),
            website: trim_optional(self.website),
            angle: trim_optional(self.angle),
            target_seconds: self.target_seconds,
            energy_mode: self.energy_mode,
        })
    }
}

fn require_field(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
