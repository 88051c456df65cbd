//! Article HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::GenerateArticle;
use crate::domain::style::StyleDna;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateArticleRequest {
    #[serde(default)]
    pub topic: String,
    pub style_sample: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateArticleResponse {
    pub article: String,
    pub style_dna: Option<StyleDna>,
}

/// 仿写文章
pub async fn generate_article(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateArticleRequest>,
) -> Result<Json<ApiResponse<GenerateArticleResponse>>, ApiError> {
    let response = state
        .generate_article_handler
        .handle(GenerateArticle {
            topic: req.topic,
            style_sample: req.style_sample,
            instruction: req.instruction,
        })
        .await?;

    Ok(Json(ApiResponse::success(GenerateArticleResponse {
        article: response.article,
        style_dna: response.style_dna,
    })))
}
