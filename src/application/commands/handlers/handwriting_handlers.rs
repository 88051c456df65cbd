//! Handwriting Command Handlers
//!
//! 长文本先分段，逐段渲染为手写图片，再垂直拼接成一张图

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};

use crate::application::commands::GenerateHandwriting;
use crate::application::error::ApplicationError;
use crate::application::ports::{HandwritingRendererPort, RenderError, RenderRequest};
use crate::domain::image::{composite, strip_data_uri_prefix, RasterImage};
use crate::domain::{segment_text, SegmentConfig, DEFAULT_MAX_CHARS};

/// 渲染参数默认值
#[derive(Debug, Clone, PartialEq)]
pub struct HandwritingSettings {
    pub steps: u32,
    pub guidance_scale: f64,
    pub max_segment_chars: usize,
    /// 同时进行的渲染请求数
    pub max_concurrent: usize,
}

impl Default for HandwritingSettings {
    fn default() -> Self {
        Self {
            steps: 12,
            guidance_scale: 2.0,
            max_segment_chars: DEFAULT_MAX_CHARS,
            max_concurrent: 1,
        }
    }
}

/// 手写图片生成响应
#[derive(Debug, Clone)]
pub struct GenerateHandwritingResponse {
    /// `data:image/png;base64,...`
    pub image_data_uri: String,
    pub segments_count: usize,
    /// 使用占位图的段数
    pub placeholder_segments: usize,
    pub width: u32,
    pub height: u32,
}

struct SegmentImage {
    image: RasterImage,
    placeholder: bool,
}

/// GenerateHandwriting Handler
#[derive(Clone)]
pub struct GenerateHandwritingHandler {
    renderer: Arc<dyn HandwritingRendererPort>,
    placeholder: Arc<dyn HandwritingRendererPort>,
    settings: HandwritingSettings,
}

impl GenerateHandwritingHandler {
    pub fn new(
        renderer: Arc<dyn HandwritingRendererPort>,
        placeholder: Arc<dyn HandwritingRendererPort>,
        settings: HandwritingSettings,
    ) -> Self {
        Self {
            renderer,
            placeholder,
            settings,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateHandwriting,
    ) -> Result<GenerateHandwritingResponse, ApplicationError> {
        if command.input_text.trim().is_empty() {
            return Err(ApplicationError::validation("input_text 不能为空"));
        }
        let max_chars = command
            .max_segment_chars
            .unwrap_or(self.settings.max_segment_chars);
        if max_chars == 0 {
            return Err(ApplicationError::validation("max_segment_chars 必须大于 0"));
        }

        let segments = segment_text(&command.input_text, &SegmentConfig { max_chars });
        let style_image = command
            .style_image
            .as_deref()
            .map(|s| strip_data_uri_prefix(s.trim()))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let requests: Vec<RenderRequest> = segments
            .iter()
            .map(|segment| RenderRequest {
                input_text: segment.clone(),
                style_image: style_image.clone(),
                steps: command.steps.unwrap_or(self.settings.steps),
                guidance_scale: command
                    .guidance_scale
                    .unwrap_or(self.settings.guidance_scale),
            })
            .collect();

        tracing::info!(
            segments = requests.len(),
            max_chars = max_chars,
            has_style_image = style_image.is_some(),
            "Rendering handwriting"
        );

        let rendered = self.render_all(&requests).await?;
        let placeholder_segments = rendered.iter().filter(|r| r.placeholder).count();
        let images: Vec<RasterImage> = rendered.into_iter().map(|r| r.image).collect();

        let final_image = composite(images)?;
        let image_data_uri = final_image.to_data_uri()?;

        tracing::info!(
            segments = requests.len(),
            placeholder_segments = placeholder_segments,
            width = final_image.width(),
            height = final_image.height(),
            "Handwriting image generated"
        );

        Ok(GenerateHandwritingResponse {
            image_data_uri,
            segments_count: requests.len(),
            placeholder_segments,
            width: final_image.width(),
            height: final_image.height(),
        })
    }

    /// 渲染所有分段，结果按分段顺序返回
    async fn render_all(&self, requests: &[RenderRequest]) -> Result<Vec<SegmentImage>, RenderError> {
        let total = requests.len();
        // future 先收集再交给 stream，否则 axum Handler 的生命周期约束不成立
        let pending: Vec<_> = requests
            .iter()
            .enumerate()
            .map(|(index, request)| self.render_segment(index, total, request))
            .collect();
        let results: Vec<Result<SegmentImage, RenderError>> = stream::iter(pending)
            .buffered(self.settings.max_concurrent.max(1))
            .collect()
            .await;

        results.into_iter().collect()
    }

    async fn render_segment(
        &self,
        index: usize,
        total: usize,
        request: &RenderRequest,
    ) -> Result<SegmentImage, RenderError> {
        tracing::debug!(
            segment = index + 1,
            total = total,
            chars = request.input_text.chars().count(),
            "Rendering segment"
        );

        match self.renderer.render(request).await {
            Ok(image) => Ok(SegmentImage {
                image,
                placeholder: false,
            }),
            Err(e) => {
                tracing::warn!(
                    segment = index + 1,
                    total = total,
                    error = %e,
                    "Handwriting render failed, using placeholder"
                );
                let image = self.placeholder.render(request).await?;
                Ok(SegmentImage {
                    image,
                    placeholder: true,
                })
            }
        }
    }
}
