//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET   存活检查
//! - /api/health                GET   外部服务可用性
//! - /api/style/analyze         POST  分析文本风格
//! - /api/article/generate      POST  仿写文章
//! - /api/handwriting/generate  POST  生成手写图片
//! - /api/workflow/complete     POST  完整工作流

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/style/analyze", post(handlers::analyze_style))
        .route("/article/generate", post(handlers::generate_article))
        .route("/handwriting/generate", post(handlers::generate_handwriting))
        .route("/workflow/complete", post(handlers::complete_workflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::commands::handlers::test_support::{FakeRenderer, ScriptedCompletion};
    use crate::application::{CompletionError, GenerationSettings, HandwritingSettings};
    use crate::domain::style::StyleThresholds;

    const OUTLINE: &str = r#"[{"index": 1, "point": "Only point", "connection": "Start"}]"#;

    fn app(engine: ScriptedCompletion) -> Router {
        app_with_settings(engine, HandwritingSettings::default())
    }

    fn app_with_settings(engine: ScriptedCompletion, settings: HandwritingSettings) -> Router {
        let state = AppState::new(
            Arc::new(engine),
            Arc::new(FakeRenderer::new([255, 0, 0, 255])),
            Arc::new(FakeRenderer::new([200, 200, 200, 255])),
            StyleThresholds::default(),
            GenerationSettings::default(),
            settings,
            40,
        );
        create_routes().with_state(Arc::new(state))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Value {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let request = Request::builder().uri("/api/ping").body(Body::empty()).unwrap();
        let response = app(ScriptedCompletion::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_reports_services() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = app(ScriptedCompletion::default())
            .oneshot(request)
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"], json!({ "completion": true, "handwriting": true }));
    }

    #[tokio::test]
    async fn test_analyze_style() {
        let body = post_json(
            app(ScriptedCompletion::default()),
            "/api/style/analyze",
            json!({ "text": "Hello world." }),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["style_dna"]["avg_sent_len"], 11.0);
        assert_eq!(body["data"]["style_dna"]["tone"], "neutral");
        assert_eq!(body["data"]["style_dna"]["transitions"], json!(["common"]));
    }

    #[tokio::test]
    async fn test_analyze_empty_text_is_bad_request() {
        let body = post_json(
            app(ScriptedCompletion::default()),
            "/api/style/analyze",
            json!({ "text": "" }),
        )
        .await;

        assert_eq!(body["errno"], 400);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_article_generation_failure_is_service_unavailable() {
        let engine = ScriptedCompletion::new(vec![Err(CompletionError::NetworkError(
            "connection refused".to_string(),
        ))]);

        let body = post_json(app(engine), "/api/article/generate", json!({ "topic": "tea" })).await;

        assert_eq!(body["errno"], 503);
        assert!(body["error"].as_str().unwrap().contains("outline"));
    }

    #[tokio::test]
    async fn test_article_generation() {
        let engine = ScriptedCompletion::ok(&[OUTLINE, "Tea is calm."]);

        let body = post_json(
            app(engine),
            "/api/article/generate",
            json!({ "topic": "tea", "style_sample": "I drink tea. It is nice." }),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["article"], "Tea is calm.");
        assert!(body["data"]["style_dna"].is_object());
    }

    #[tokio::test]
    async fn test_handwriting_generation() {
        let body = post_json(
            app(ScriptedCompletion::default()),
            "/api/handwriting/generate",
            json!({ "input_text": "第一句。第二句。", "max_segment_chars": 4 }),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["segments_count"], 2);
        assert!(body["data"]["image"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_handwriting_generation_concurrent_segments() {
        let settings = HandwritingSettings {
            max_concurrent: 3,
            ..HandwritingSettings::default()
        };

        let body = post_json(
            app_with_settings(ScriptedCompletion::default(), settings),
            "/api/handwriting/generate",
            json!({ "input_text": "一二三四。五六七。八九", "max_segment_chars": 5 }),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["segments_count"], 3);
        assert_eq!(body["data"]["placeholder_segments"], 0);
        // FakeRenderer: 宽 = 字数 * 10，高 20
        assert_eq!(body["data"]["width"], 50);
        assert_eq!(body["data"]["height"], 60);
    }

    #[tokio::test]
    async fn test_workflow_complete() {
        let engine = ScriptedCompletion::ok(&[OUTLINE, "A short handwritten note."]);

        let body = post_json(
            app(engine),
            "/api/workflow/complete",
            json!({ "topic": "notes" }),
        )
        .await;

        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["article"], "A short handwritten note.");
        assert_eq!(body["data"]["line_length"], 40);
        assert_eq!(body["data"]["style_dna"], Value::Null);
        assert!(body["data"]["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_workflow_missing_topic() {
        let body = post_json(
            app(ScriptedCompletion::default()),
            "/api/workflow/complete",
            json!({}),
        )
        .await;

        assert_eq!(body["errno"], 400);
    }
}
