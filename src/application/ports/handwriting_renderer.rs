//! Handwriting Renderer Port - 手写图片渲染抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::image::RasterImage;

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    /// `status` 为 HTTP 状态码；服务以 `success: false` 拒绝时为 None
    #[error("Service error: {message}")]
    ServiceError {
        status: Option<u16>,
        message: String,
    },

    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Placeholder rendering failed: {0}")]
    Placeholder(String),
}

impl RenderError {
    /// 传输层失败和非 JSON 响应可以重试；服务明确返回的失败不重试
    pub fn is_retryable(&self) -> bool {
        match self {
            RenderError::NetworkError(_) | RenderError::UnexpectedContentType(_) => true,
            RenderError::ServiceError { status, .. } => status.is_some(),
            RenderError::InvalidImage(_) | RenderError::Placeholder(_) => false,
        }
    }
}

/// 单段渲染请求
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// 要书写的文本
    pub input_text: String,
    /// 手写风格参考图（纯 Base64，不带 data URI 前缀）
    pub style_image: Option<String>,
    pub steps: u32,
    pub guidance_scale: f64,
}

/// Handwriting Renderer Port
#[async_trait]
pub trait HandwritingRendererPort: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<RasterImage, RenderError>;

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(RenderError::NetworkError("reset".into()).is_retryable());
        assert!(RenderError::UnexpectedContentType("text/html".into()).is_retryable());
        assert!(RenderError::ServiceError {
            status: Some(502),
            message: "bad gateway".into()
        }
        .is_retryable());
        assert!(!RenderError::ServiceError {
            status: None,
            message: "Generation failed".into()
        }
        .is_retryable());
        assert!(!RenderError::InvalidImage("truncated".into()).is_retryable());
    }
}
