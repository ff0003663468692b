pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/run", post(handlers::handle_analyze))
        .with_state(state)
}

/// CORS restricted to the configured front-end origins.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::extractor::stub::StubExtractor;
    use crate::analysis::pipeline::AnalysisPipeline;
    use crate::config::Config;

    fn test_state(stub: StubExtractor) -> AppState {
        AppState {
            pipeline: AnalysisPipeline::new(Arc::new(stub)),
            config: Config {
                anthropic_api_key: "test".to_string(),
                anthropic_api_url: "http://localhost:0".to_string(),
                llm_model: "test-model".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                allowed_origins: vec![],
                min_resume_chars: 10,
            },
        }
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let router = build_router(test_state(StubExtractor::default()));
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_analyze_returns_gap_summary() {
        let router = build_router(test_state(StubExtractor::default()));
        let (status, json) = post_json(
            router,
            "/analyze",
            json!({
                "resume_text": "python, sql, docker",
                "jd_inputs": [
                    {"category": "required", "text": "python, sql"},
                    {"category": "preferred", "text": "docker"},
                    {"category": "responsibility", "text": "airflow"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let summary = &json["gap_summary"];
        assert_eq!(summary["match_score"], 100);
        assert_eq!(summary["missing_keywords"], json!([]));
        assert_eq!(summary["keyword_matches"].as_array().unwrap().len(), 3);
        assert_eq!(summary["notes"], "Found 3 resume keywords. Missing 0 JD keywords.");
    }

    #[tokio::test]
    async fn test_run_alias_scores_partial_match() {
        let router = build_router(test_state(StubExtractor::default()));
        let (status, json) = post_json(
            router,
            "/run",
            json!({
                "resume_text": "python, rust, go",
                "jd_inputs": [
                    {"category": "required", "text": "python, sql"},
                    {"category": "preferred", "text": "docker"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["gap_summary"]["match_score"], 35);
        let missing: Vec<&str> = json["gap_summary"]["validated_missing_keywords"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["keyword_text"].as_str().unwrap())
            .collect();
        assert_eq!(missing, vec!["sql", "docker"]);
    }

    #[tokio::test]
    async fn test_short_resume_is_bad_request() {
        let router = build_router(test_state(StubExtractor::default()));
        let (status, json) = post_json(
            router,
            "/analyze",
            json!({
                "resume_text": "python",
                "jd_inputs": [{"category": "required", "text": "python"}]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_category_is_client_error() {
        let router = build_router(test_state(StubExtractor::default()));
        let (status, _) = post_json(
            router,
            "/analyze",
            json!({
                "resume_text": "python and more",
                "jd_inputs": [{"category": "bonus", "text": "python"}]
            }),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_extraction_failure_is_server_error_without_summary() {
        let router = build_router(test_state(StubExtractor::failing_on("BROKEN")));
        let (status, json) = post_json(
            router,
            "/analyze",
            json!({
                "resume_text": "python, sql, docker",
                "jd_inputs": [{"category": "required", "text": "BROKEN"}]
            }),
        )
        .await;
        assert!(status.is_server_error());
        assert_eq!(json["error"]["code"], "EXTRACTION_ERROR");
        assert!(json.get("gap_summary").is_none());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_ok());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
