//! Content fingerprints.
//!
//! A fingerprint is a SHA-256 digest over the canonical creative fields of a
//! request (startup name, tweet text, angle). Cosmetic fields such as the
//! tweet ID, author handle, website, target duration, and energy mode are
//! deliberately excluded so equivalent requests share one cached artifact.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::request::RoastRequest;

/// Hex length of a SHA-256 digest.
const FINGERPRINT_LEN: usize = 64;

/// Canonical field subset hashed into the fingerprint. Field order is part of
/// the format; do not reorder.
#[derive(Serialize)]
struct CanonicalFields<'a> {
    #[serde(rename = "startupName")]
    startup_name: &'a str,
    #[serde(rename = "tweetText")]
    tweet_text: &'a str,
    angle: Option<&'a str>,
}

/// Deterministic digest over canonical request fields, used as the cache key
/// and as the seed source for video generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint for a request.
    pub fn compute(request: &RoastRequest) -> Self {
        let canonical = CanonicalFields {
            startup_name: request.startup_name.trim(),
            tweet_text: request.tweet_text.trim(),
            angle: request.angle.as_deref(),
        };

        // CanonicalFields serialization is infallible: strings and an option.
        let payload = serde_json::to_string(&canonical).unwrap_or_default();
        let digest = Sha256::digest(payload.as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Parse a fingerprint from an untrusted string.
    ///
    /// Accepts exactly 64 hex chars (case-insensitive, normalized to
    /// lowercase). Returns `None` for anything else, before any storage I/O
    /// can happen with the value.
    pub fn parse(value: &str) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Self(value.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Check whether a string is a well-formed fingerprint.
    pub fn is_valid(value: &str) -> bool {
        value.len() == FINGERPRINT_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Derived numeric seed: first 8 hex chars as a u32, 0 on parse failure.
    pub fn seed(&self) -> u32 {
        u32::from_str_radix(&self.0[..8], 16).unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
