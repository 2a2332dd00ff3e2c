//! Video file serving.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiResult;
use crate::state::AppState;

/// Serve a stored roast video by file name.
///
/// The store validates the name against the `{fingerprint}.mp4` shape before
/// touching the filesystem; anything else comes back as a 404.
pub async fn serve_video(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Response> {
    let bytes = state.store.read_video(&file_name).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "video/mp4"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        bytes,
    )
        .into_response())
}
