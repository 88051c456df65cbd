//! 测试用的端口实现

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    CompletionEnginePort, CompletionError, CompletionOptions, HandwritingRendererPort,
    RenderError, RenderRequest,
};
use crate::domain::image::RasterImage;

/// 按顺序返回预设响应，并记录每次调用的提示词和参数
#[derive(Default)]
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<(String, CompletionOptions)>>,
}

impl ScriptedCompletion {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(responses: &[&str]) -> Self {
        Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn calls(&self) -> Vec<(String, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionEnginePort for ScriptedCompletion {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("paragraph for: {}", prompt.len())))
    }
}

/// 每段渲染成 `宽 = 字符数 * 10`、高 20 的纯色图；文本包含 `fail_on` 时返回错误
pub struct FakeRenderer {
    color: [u8; 4],
    fail_on: Option<String>,
    requests: Mutex<Vec<RenderRequest>>,
}

impl FakeRenderer {
    pub fn new(color: [u8; 4]) -> Self {
        Self {
            color,
            fail_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(color: [u8; 4], marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::new(color)
        }
    }

    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HandwritingRendererPort for FakeRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<RasterImage, RenderError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(marker) = &self.fail_on {
            if request.input_text.contains(marker.as_str()) {
                return Err(RenderError::NetworkError("connection refused".to_string()));
            }
        }

        let width = (request.input_text.chars().count() as u32 * 10).max(1);
        Ok(RasterImage::filled(width, 20, self.color))
    }
}

/// 总是失败的渲染器
pub struct BrokenRenderer;

#[async_trait]
impl HandwritingRendererPort for BrokenRenderer {
    async fn render(&self, _request: &RenderRequest) -> Result<RasterImage, RenderError> {
        Err(RenderError::Placeholder("no fonts".to_string()))
    }
}
