//! Process-scoped fallback asset.
//!
//! Loaded at most once per process and cached for its lifetime. This path
//! must never fail: when the configured asset file cannot be read, the bytes
//! embedded at compile time are used instead.

use std::sync::OnceLock;

use tracing::{info, warn};

static FALLBACK_VIDEO: OnceLock<Vec<u8>> = OnceLock::new();

const EMBEDDED_FALLBACK: &[u8] = include_bytes!("../assets/fallback.mp4");

/// The fallback clip bytes.
pub fn fallback_video_bytes() -> &'static [u8] {
    FALLBACK_VIDEO.get_or_init(load_fallback)
}

fn load_fallback() -> Vec<u8> {
    if let Ok(path) = std::env::var("ROAST_FALLBACK_VIDEO") {
        match std::fs::read(&path) {
            Ok(bytes) => {
                info!(path, size = bytes.len(), "Loaded fallback video asset");
                return bytes;
            }
            Err(e) => {
                warn!(path, "Fallback asset unreadable, using embedded clip: {}", e);
            }
        }
    }

    EMBEDDED_FALLBACK.to_vec()
}
