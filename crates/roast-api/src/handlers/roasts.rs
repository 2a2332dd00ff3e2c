//! Roast generation and cache administration handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::error;

use roast_models::{RoastOutput, RoastRequest};

use crate::error::ApiResult;
use crate::state::AppState;

/// Generate a roast clip for a pitch.
///
/// Identical creative inputs return the cached result without regenerating.
pub async fn create_roast(
    State(state): State<AppState>,
    Json(request): Json<RoastRequest>,
) -> ApiResult<Json<RoastOutput>> {
    let output = state.pipeline.run(request).await?;
    Ok(Json(output))
}

/// Cache clear response.
#[derive(Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Delete every cached artifact and video blob.
///
/// Always returns 200; a failed sweep is reported in the body so callers can
/// distinguish "nothing to delete" from "could not delete".
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    match state.pipeline.clear_cache().await {
        Ok(count) => Json(ClearCacheResponse {
            success: true,
            count,
            error: None,
        }),
        Err(e) => {
            error!("Cache clear failed: {}", e);
            Json(ClearCacheResponse {
                success: false,
                count: 0,
                error: Some(e.to_string()),
            })
        }
    }
}
