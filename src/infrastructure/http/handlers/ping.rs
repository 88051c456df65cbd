//! Ping / Health Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 存活检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 外部服务可用性
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub completion: bool,
    pub handwriting: bool,
}

/// 检查补全服务和手写服务是否可达
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthResponse>> {
    let (completion, handwriting) = tokio::join!(
        state.completion_engine.health_check(),
        state.handwriting_renderer.health_check()
    );

    if !completion || !handwriting {
        tracing::warn!(completion, handwriting, "Upstream service unavailable");
    }

    Json(ApiResponse::success(HealthResponse {
        completion,
        handwriting,
    }))
}
