//! Completion Engine Port - 文本续写模型抽象
//!
//! 定义语言模型补全的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 补全错误
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    /// 返回了非 JSON 内容（如隧道服务的 HTML 警告页）
    #[error("Unexpected content type: {content_type}")]
    UnexpectedContentType {
        content_type: String,
        warning_page: bool,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 采样参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub top_p: f64,
    pub repeat_penalty: f64,
    pub presence_penalty: f64,
    pub stop: Vec<String>,
}

impl CompletionOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            repeat_penalty: 1.2,
            presence_penalty: 0.8,
            stop: vec!["###".to_string(), "</s>".to_string()],
        }
    }
}

/// Completion Engine Port
///
/// 外部语言模型服务的抽象接口
#[async_trait]
pub trait CompletionEnginePort: Send + Sync {
    /// 发送提示词，返回去除首尾空白后的补全文本
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
