//! Style HTTP Handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::AnalyzeStyle;
use crate::infrastructure::http::dto::{ApiResponse, StyleDnaResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeStyleRequest {
    #[serde(default)]
    pub text: String,
}

/// 分析文本风格
pub async fn analyze_style(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeStyleRequest>,
) -> Result<Json<ApiResponse<StyleDnaResponse>>, ApiError> {
    let response = state
        .analyze_style_handler
        .handle(AnalyzeStyle { text: req.text })?;

    Ok(Json(ApiResponse::success(StyleDnaResponse {
        style_dna: response.style_dna,
        description: response.description,
    })))
}
