//! Handwriting HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::GenerateHandwriting;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateHandwritingRequest {
    #[serde(default)]
    pub input_text: String,
    pub style_image: Option<String>,
    pub steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    pub max_segment_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GenerateHandwritingResponse {
    /// `data:image/png;base64,...`
    pub image: String,
    pub segments_count: usize,
    pub placeholder_segments: usize,
    pub width: u32,
    pub height: u32,
}

/// 生成手写图片
pub async fn generate_handwriting(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateHandwritingRequest>,
) -> Result<Json<ApiResponse<GenerateHandwritingResponse>>, ApiError> {
    let response = state
        .generate_handwriting_handler
        .handle(GenerateHandwriting {
            input_text: req.input_text,
            style_image: req.style_image,
            steps: req.steps,
            guidance_scale: req.guidance_scale,
            max_segment_chars: req.max_segment_chars,
        })
        .await?;

    Ok(Json(ApiResponse::success(GenerateHandwritingResponse {
        image: response.image_data_uri,
        segments_count: response.segments_count,
        placeholder_segments: response.placeholder_segments,
        width: response.width,
        height: response.height,
    })))
}
