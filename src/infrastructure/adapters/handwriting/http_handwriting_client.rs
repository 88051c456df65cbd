//! HTTP Handwriting Client - 调用外部手写生成服务
//!
//! 实现 HandwritingRendererPort trait
//!
//! 外部 API:
//! POST {endpoint}
//! Request: {"input_text": "...", "style_image": "<base64>", "steps": 12, "guidance_scale": 2.0}
//! Response: {"success": true, "result_image_base64": "..."} 或 {"success": false, "error": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{HandwritingRendererPort, RenderError, RenderRequest};
use crate::domain::image::RasterImage;
use crate::infrastructure::adapters::http_support::{
    build_client, content_type, is_json, looks_like_warning_page, preview, RetryPolicy,
};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    input_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_image: Option<&'a str>,
    steps: u32,
    guidance_scale: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    result_image_base64: Option<String>,
    error: Option<String>,
}

/// HTTP 手写客户端配置
#[derive(Debug, Clone)]
pub struct HttpHandwritingClientConfig {
    /// 完整的生成接口地址
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for HttpHandwritingClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7860/coze/generate".to_string(),
            timeout_secs: None,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl HttpHandwritingClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }
}

/// HTTP 手写客户端
pub struct HttpHandwritingClient {
    client: Client,
    config: HttpHandwritingClientConfig,
    retry: RetryPolicy,
}

impl HttpHandwritingClient {
    pub fn new(config: HttpHandwritingClientConfig) -> Result<Self, RenderError> {
        let client =
            build_client(config.timeout_secs).map_err(|e| RenderError::NetworkError(e.to_string()))?;
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay_ms);

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    async fn try_render(&self, request: &GenerateRequest<'_>) -> Result<RasterImage, RenderError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RenderError::NetworkError(format!(
                        "Cannot connect to handwriting service: {}",
                        e
                    ))
                } else {
                    RenderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RenderError::ServiceError {
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status, preview(&error_text)),
            });
        }

        let content_type = content_type(response.headers());
        if !is_json(&content_type) {
            let body = response.text().await.unwrap_or_default();
            let kind = if looks_like_warning_page(&body) {
                "tunnel warning page"
            } else {
                "non-JSON body"
            };
            return Err(RenderError::UnexpectedContentType(format!(
                "{} ({})",
                content_type, kind
            )));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RenderError::InvalidImage(format!("Invalid response body: {}", e)))?;

        match data.result_image_base64 {
            Some(image) if data.success => {
                RasterImage::from_base64(&image).map_err(|e| RenderError::InvalidImage(e.to_string()))
            }
            _ => Err(RenderError::ServiceError {
                status: None,
                message: data.error.unwrap_or_else(|| "Generation failed".to_string()),
            }),
        }
    }
}

#[async_trait]
impl HandwritingRendererPort for HttpHandwritingClient {
    async fn render(&self, request: &RenderRequest) -> Result<RasterImage, RenderError> {
        let body = GenerateRequest {
            input_text: &request.input_text,
            style_image: request.style_image.as_deref(),
            steps: request.steps,
            guidance_scale: request.guidance_scale,
        };

        tracing::debug!(
            endpoint = %self.config.endpoint,
            chars = request.input_text.chars().count(),
            steps = request.steps,
            guidance_scale = request.guidance_scale,
            "Sending handwriting request"
        );

        let mut attempt = 1;
        loop {
            match self.try_render(&body).await {
                Ok(image) => {
                    tracing::debug!(
                        attempt = attempt,
                        width = image.width(),
                        height = image.height(),
                        "Handwriting image received"
                    );
                    return Ok(image);
                }
                Err(e) if e.is_retryable() && self.retry.has_more(attempt) => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Handwriting request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
