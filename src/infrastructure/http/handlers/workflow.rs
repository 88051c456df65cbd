//! Workflow HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::RunWorkflow;
use crate::domain::style::StyleDna;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunWorkflowRequest {
    #[serde(default)]
    pub topic: String,
    pub style_sample: Option<String>,
    pub handwriting_image: Option<String>,
    pub steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    pub max_segment_chars: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RunWorkflowResponse {
    pub run_id: Uuid,
    pub article: String,
    pub preprocessed_text: String,
    pub image: String,
    pub style_dna: Option<StyleDna>,
    pub segments_count: usize,
    pub placeholder_segments: usize,
    pub line_length: usize,
}

/// 完整工作流：风格分析 -> 仿写 -> 手写渲染
pub async fn complete_workflow(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunWorkflowRequest>,
) -> Result<Json<ApiResponse<RunWorkflowResponse>>, ApiError> {
    let response = state
        .run_workflow_handler
        .handle(RunWorkflow {
            topic: req.topic,
            style_sample: req.style_sample,
            handwriting_image: req.handwriting_image,
            steps: req.steps,
            guidance_scale: req.guidance_scale,
            max_segment_chars: req.max_segment_chars,
        })
        .await?;

    Ok(Json(ApiResponse::success(RunWorkflowResponse {
        run_id: response.run_id,
        article: response.article,
        preprocessed_text: response.preprocessed_text,
        image: response.image_data_uri,
        style_dna: response.style_dna,
        segments_count: response.segments_count,
        placeholder_segments: response.placeholder_segments,
        line_length: response.line_length,
    })))
}
