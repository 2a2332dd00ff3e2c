//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{clear_cache, create_roast, health, ready, serve_video};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/roasts", post(create_roast))
        .route("/cache/clear", post(clear_cache));

    let file_routes = Router::new().route("/roasts/:file_name", get(serve_video));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .nest("/api", api_routes)
        .merge(file_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use roast_ai::client::{TextGenClient, TextGenConfig};
    use roast_ai::{ScriptGenerator, ShotPlanner};
    use roast_pipeline::RoastPipeline;
    use roast_storage::{ArtifactStore, StoreConfig};
    use roast_video::VideoAcquirer;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router(base_url: String, root: std::path::PathBuf) -> Router {
        let client = TextGenClient::new(TextGenConfig {
            base_url,
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let store = ArtifactStore::new(StoreConfig { root });
        let pipeline = RoastPipeline::new(
            store.clone(),
            ScriptGenerator::new(client.clone()),
            ShotPlanner::new(client),
            VideoAcquirer::new(None),
        );

        create_router(AppState::with_components(
            ApiConfig::default(),
            pipeline,
            store,
        ))
    }

    async fn mount_completions(server: &MockServer) {
        let content =
            serde_json::json!({ "lines": ["Hook line"], "caption": "cap" }).to_string();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": content } }]
            })))
            .mount(server)
            .await;
    }

    fn roast_body() -> Body {
        Body::from(
            serde_json::json!({
                "tweetId": "42",
                "startupName": "Lightcone Labs",
                "tweetText": "AI toasters",
                "targetSeconds": 12,
                "energyMode": "HYPER"
            })
            .to_string(),
        )
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = router(server.uri(), dir.path().to_path_buf());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("X-Content-Type-Options").unwrap(),
            "nosniff"
        );
        assert!(response.headers().contains_key("X-Request-ID"));
    }

    #[tokio::test]
    async fn test_create_roast_and_fetch_video() {
        let server = MockServer::start().await;
        mount_completions(&server).await;

        let dir = tempfile::tempdir().unwrap();
        let app = router(server.uri(), dir.path().to_path_buf());

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/roasts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(roast_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let output: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(output["tweetId"], "42");
        assert_eq!(output["fromCache"], false);

        let video_url = output["videoUrl"].as_str().unwrap();

        let response = app
            .oneshot(Request::get(video_url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "video/mp4"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[tokio::test]
    async fn test_invalid_request_is_400() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = router(server.uri(), dir.path().to_path_buf());

        let response = app
            .oneshot(
                Request::post("/api/roasts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "tweetId": "42",
                            "startupName": "  ",
                            "tweetText": "AI toasters"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bogus_video_name_is_404() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let app = router(server.uri(), dir.path().to_path_buf());

        for name in ["/roasts/short.mp4", "/roasts/..%2Fescape.mp4"] {
            let response = app
                .clone()
                .oneshot(Request::get(name).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "for {name}");
        }
    }

    #[tokio::test]
    async fn test_cache_clear_reports_count() {
        let server = MockServer::start().await;
        mount_completions(&server).await;

        let dir = tempfile::tempdir().unwrap();
        let app = router(server.uri(), dir.path().to_path_buf());

        app.clone()
            .oneshot(
                Request::post("/api/roasts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(roast_body())
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::post("/api/cache/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
    }
}
