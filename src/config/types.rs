//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::{CompletionOptions, GenerationSettings, HandwritingSettings};
use crate::domain::style::StyleThresholds;
use crate::domain::{DEFAULT_LINE_LENGTH, DEFAULT_MAX_CHARS};
use crate::infrastructure::adapters::{HttpCompletionClientConfig, HttpHandwritingClientConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语言模型服务配置
    #[serde(default)]
    pub completion: CompletionConfig,

    /// 手写服务配置
    #[serde(default)]
    pub handwriting: HandwritingConfig,

    /// 风格分析阈值
    #[serde(default)]
    pub style: StyleThresholds,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语言模型服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// 服务基础 URL（Ollama 兼容）
    #[serde(default = "default_completion_url")]
    pub url: String,

    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 总尝试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 重试基础间隔（毫秒）
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// 请求超时（秒），不设置则不限制
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_outline_temperature")]
    pub outline_temperature: f64,

    #[serde(default = "default_paragraph_temperature")]
    pub paragraph_temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f64,

    #[serde(default = "default_presence_penalty")]
    pub presence_penalty: f64,
}

fn default_completion_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "ghostwriter".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_outline_temperature() -> f64 {
    0.7
}

fn default_paragraph_temperature() -> f64 {
    1.5
}

fn default_top_p() -> f64 {
    0.95
}

fn default_repeat_penalty() -> f64 {
    1.2
}

fn default_presence_penalty() -> f64 {
    0.8
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            url: default_completion_url(),
            model: default_model(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: None,
            outline_temperature: default_outline_temperature(),
            paragraph_temperature: default_paragraph_temperature(),
            top_p: default_top_p(),
            repeat_penalty: default_repeat_penalty(),
            presence_penalty: default_presence_penalty(),
        }
    }
}

impl CompletionConfig {
    /// HTTP 客户端配置
    pub fn client_config(&self) -> HttpCompletionClientConfig {
        HttpCompletionClientConfig {
            base_url: self.url.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
        }
    }

    /// 大纲和段落两个阶段的采样参数
    pub fn generation_settings(&self) -> GenerationSettings {
        let base = CompletionOptions {
            top_p: self.top_p,
            repeat_penalty: self.repeat_penalty,
            presence_penalty: self.presence_penalty,
            ..CompletionOptions::default()
        };

        GenerationSettings {
            outline_options: base.clone().with_temperature(self.outline_temperature),
            paragraph_options: base.with_temperature(self.paragraph_temperature),
        }
    }
}

/// 手写服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct HandwritingConfig {
    /// 关闭时所有分段直接使用占位图
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 完整的生成接口地址
    #[serde(default = "default_handwriting_url")]
    pub url: String,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_steps")]
    pub steps: u32,

    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,

    /// 单段最大字符数
    #[serde(default = "default_max_segment_chars")]
    pub max_segment_chars: usize,

    /// 工作流中排版的行宽
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// 同时进行的渲染请求数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_handwriting_url() -> String {
    "http://localhost:7860/coze/generate".to_string()
}

fn default_steps() -> u32 {
    12
}

fn default_guidance_scale() -> f64 {
    2.0
}

fn default_max_segment_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_line_length() -> usize {
    DEFAULT_LINE_LENGTH
}

fn default_max_concurrent() -> usize {
    1
}

impl Default for HandwritingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_handwriting_url(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: None,
            steps: default_steps(),
            guidance_scale: default_guidance_scale(),
            max_segment_chars: default_max_segment_chars(),
            line_length: default_line_length(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

impl HandwritingConfig {
    /// HTTP 客户端配置
    pub fn client_config(&self) -> HttpHandwritingClientConfig {
        HttpHandwritingClientConfig {
            endpoint: self.url.clone(),
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
        }
    }

    pub fn settings(&self) -> HandwritingSettings {
        HandwritingSettings {
            steps: self.steps,
            guidance_scale: self.guidance_scale,
            max_segment_chars: self.max_segment_chars,
            max_concurrent: self.max_concurrent,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
