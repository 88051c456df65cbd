//! Workflow Command Handlers
//!
//! 风格分析 -> 仿写 -> 按行宽排版 -> 手写渲染

use tracing::Instrument;
use uuid::Uuid;

use crate::application::commands::{GenerateArticle, GenerateHandwriting, RunWorkflow};
use crate::application::error::ApplicationError;
use crate::domain::style::StyleDna;
use crate::domain::{wrap_lines, DEFAULT_LINE_LENGTH};

use super::{GenerateArticleHandler, GenerateHandwritingHandler};

/// 完整工作流响应
#[derive(Debug, Clone)]
pub struct RunWorkflowResponse {
    pub run_id: Uuid,
    pub article: String,
    /// 按行宽换行后的文本
    pub preprocessed_text: String,
    pub image_data_uri: String,
    pub style_dna: Option<StyleDna>,
    pub segments_count: usize,
    pub placeholder_segments: usize,
    pub line_length: usize,
}

/// RunWorkflow Handler
#[derive(Clone)]
pub struct RunWorkflowHandler {
    article_handler: GenerateArticleHandler,
    handwriting_handler: GenerateHandwritingHandler,
    line_length: usize,
}

impl RunWorkflowHandler {
    pub fn new(
        article_handler: GenerateArticleHandler,
        handwriting_handler: GenerateHandwritingHandler,
        line_length: usize,
    ) -> Self {
        Self {
            article_handler,
            handwriting_handler,
            line_length: if line_length == 0 {
                DEFAULT_LINE_LENGTH
            } else {
                line_length
            },
        }
    }

    pub async fn handle(&self, command: RunWorkflow) -> Result<RunWorkflowResponse, ApplicationError> {
        if command.topic.trim().is_empty() {
            return Err(ApplicationError::validation("topic 不能为空"));
        }

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("workflow", run_id = %run_id);

        async move {
            tracing::info!(topic = %command.topic.trim(), "Workflow started");

            let article = self
                .article_handler
                .handle(GenerateArticle {
                    topic: command.topic,
                    style_sample: command.style_sample,
                    instruction: None,
                })
                .await?;

            let preprocessed_text = wrap_lines(&article.article, self.line_length);
            tracing::debug!(
                chars = preprocessed_text.chars().count(),
                lines = preprocessed_text.lines().count(),
                "Article wrapped"
            );

            let handwriting = self
                .handwriting_handler
                .handle(GenerateHandwriting {
                    input_text: preprocessed_text.clone(),
                    style_image: command.handwriting_image,
                    steps: command.steps,
                    guidance_scale: command.guidance_scale,
                    max_segment_chars: command.max_segment_chars,
                })
                .await?;

            tracing::info!(
                segments = handwriting.segments_count,
                placeholder_segments = handwriting.placeholder_segments,
                "Workflow completed"
            );

            Ok(RunWorkflowResponse {
                run_id,
                article: article.article,
                preprocessed_text,
                image_data_uri: handwriting.image_data_uri,
                style_dna: article.style_dna,
                segments_count: handwriting.segments_count,
                placeholder_segments: handwriting.placeholder_segments,
                line_length: self.line_length,
            })
        }
        .instrument(span)
        .await
    }
}
