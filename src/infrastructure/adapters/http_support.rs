//! 外部 HTTP 服务调用的公共部分：客户端构建、重试节奏、响应类型判断

use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;

/// 错误信息中保留的响应体字符数
const BODY_PREVIEW_CHARS: usize = 200;

/// 线性退避重试策略
///
/// 第 k 次失败后等待 `base_delay * k`；隧道服务返回 HTML 警告页时等待翻倍
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 总尝试次数（至少 1）
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    pub fn warning_page_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt * 2
    }

    pub fn has_more(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// 构建 HTTP 客户端；未配置超时时不限制请求时长
pub fn build_client(timeout_secs: Option<u64>) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// 读取 Content-Type，缺失时为空字符串
pub fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

pub fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json")
}

/// 隧道服务（ngrok）的浏览器警告页
pub fn looks_like_warning_page(body: &str) -> bool {
    body.contains("<!DOCTYPE html>") || body.contains("ngrok")
}

/// 截取响应体开头用于错误信息
pub fn preview(body: &str) -> String {
    let mut head: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    if body.chars().count() > BODY_PREVIEW_CHARS {
        head.push_str("...");
    }
    head
}
