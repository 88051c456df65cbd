//! 应用层错误定义
//!
//! 统一的命令错误类型

use std::fmt;

use thiserror::Error;

use crate::application::ports::{CompletionError, RenderError};
use crate::domain::image::{CompositionError, ImageCodecError};
use crate::domain::style::StyleError;

/// 文章生成所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Outline,
    /// 段落序号（从 1 开始）
    Paragraph(usize),
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStage::Outline => write!(f, "outline"),
            GenerationStage::Paragraph(n) => write!(f, "paragraph {}", n),
        }
    }
}

/// 文章生成失败（补全服务重试耗尽或响应不可用），不返回部分文章
#[derive(Debug, Error)]
#[error("Article generation failed at {stage}: {source}")]
pub struct GenerationError {
    pub stage: GenerationStage,
    #[source]
    pub source: CompletionError,
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 补全服务失败
    #[error(transparent)]
    GenerationError(#[from] GenerationError),

    /// 渲染失败（包括占位图也失败）
    #[error("Render error: {0}")]
    RenderError(#[from] RenderError),

    /// 图片拼接失败
    #[error("Composition error: {0}")]
    CompositionError(String),

    /// 内部错误（如结果图片编码失败）
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<StyleError> for ApplicationError {
    fn from(err: StyleError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<CompositionError> for ApplicationError {
    fn from(err: CompositionError) -> Self {
        Self::CompositionError(err.to_string())
    }
}

impl From<ImageCodecError> for ApplicationError {
    fn from(err: ImageCodecError) -> Self {
        match err {
            ImageCodecError::Encode(_) => Self::InternalError(err.to_string()),
            _ => Self::CompositionError(err.to_string()),
        }
    }
}
