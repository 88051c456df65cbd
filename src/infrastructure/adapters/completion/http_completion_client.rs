//! HTTP Completion Client - 调用 Ollama 兼容的生成接口
//!
//! 实现 CompletionEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/api/generate
//! Request: {"model": "...", "prompt": "...", "stream": false, "options": {...}}
//! Response: {"response": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{CompletionEnginePort, CompletionError, CompletionOptions};
use crate::infrastructure::adapters::http_support::{
    build_client, content_type, is_json, looks_like_warning_page, preview, RetryPolicy,
};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a CompletionOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// HTTP 补全客户端配置
#[derive(Debug, Clone)]
pub struct HttpCompletionClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 请求超时时间（秒），None 表示不限制
    pub timeout_secs: Option<u64>,
    /// 总尝试次数
    pub max_retries: u32,
    /// 重试基础间隔（毫秒）
    pub retry_delay_ms: u64,
}

impl Default for HttpCompletionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "ghostwriter".to_string(),
            timeout_secs: None,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

impl HttpCompletionClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
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

/// HTTP 补全客户端
pub struct HttpCompletionClient {
    client: Client,
    config: HttpCompletionClientConfig,
    retry: RetryPolicy,
}

impl HttpCompletionClient {
    pub fn new(config: HttpCompletionClientConfig) -> Result<Self, CompletionError> {
        let client = build_client(config.timeout_secs)
            .map_err(|e| CompletionError::NetworkError(e.to_string()))?;
        let retry = RetryPolicy::new(config.max_retries, config.retry_delay_ms);

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/api/tags", self.config.base_url.trim_end_matches('/'))
    }

    async fn try_complete(&self, request: &GenerateRequest<'_>) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(self.generate_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    CompletionError::NetworkError(format!(
                        "Cannot connect to completion service: {}",
                        e
                    ))
                } else {
                    CompletionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::ServiceError(format!(
                "HTTP {}: {}",
                status,
                preview(&error_text)
            )));
        }

        let content_type = content_type(response.headers());
        if !is_json(&content_type) {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::UnexpectedContentType {
                content_type,
                warning_page: looks_like_warning_page(&body),
            });
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(data.response.trim().to_string())
    }
}

#[async_trait]
impl CompletionEnginePort for HttpCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options,
        };

        tracing::debug!(
            url = %self.generate_url(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            temperature = options.temperature,
            "Sending completion request"
        );

        let mut attempt = 1;
        loop {
            match self.try_complete(&request).await {
                Ok(text) => {
                    tracing::debug!(attempt = attempt, response_len = text.len(), "Completion received");
                    return Ok(text);
                }
                Err(e) if self.retry.has_more(attempt) => {
                    let delay = match &e {
                        CompletionError::UnexpectedContentType {
                            warning_page: true, ..
                        } => self.retry.warning_page_delay(attempt),
                        _ => self.retry.delay_for(attempt),
                    };
                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Completion request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(attempt = attempt, error = %e, "Completion request failed");
                    return Err(e);
                }
            }
        }
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::infrastructure::adapters::test_server::{closed_url, spawn};

    fn client(base_url: &str, attempts: u32) -> HttpCompletionClient {
        HttpCompletionClient::new(
            HttpCompletionClientConfig::new(base_url).with_retries(attempts, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpCompletionClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "ghostwriter");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpCompletionClientConfig::new("http://example.com:9000")
            .with_model("llama3")
            .with_timeout(60);
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.timeout_secs, Some(60));
    }

    #[tokio::test]
    async fn test_complete_sends_ollama_body() {
        let captured = Arc::new(Mutex::new(None::<Value>));
        let sink = captured.clone();
        let router = Router::new().route(
            "/api/generate",
            post(move |Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(body);
                    Json(json!({ "response": "  Once upon a time.  " }))
                }
            }),
        );
        let url = spawn(router).await;

        let text = client(&url, 1)
            .complete("Tell a story", &CompletionOptions::default().with_temperature(1.5))
            .await
            .unwrap();

        assert_eq!(text, "Once upon a time.");
        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "ghostwriter");
        assert_eq!(body["prompt"], "Tell a story");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["temperature"], 1.5);
        assert_eq!(body["options"]["stop"], json!(["###", "</s>"]));
    }

    #[tokio::test]
    async fn test_retries_after_warning_page() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/generate",
            post(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (
                            [(header::CONTENT_TYPE, "text/html")],
                            "<!DOCTYPE html><p>ngrok warning</p>",
                        )
                            .into_response()
                    } else {
                        Json(json!({ "response": "ok" })).into_response()
                    }
                }
            }),
        );
        let url = spawn(router).await;

        let text = client(&url, 2)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(text, "ok");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/generate",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
                }
            }),
        );
        let url = spawn(router).await;

        let err = client(&url, 3)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CompletionError::ServiceError(ref msg) if msg.contains("model not loaded")));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_missing_response_field_is_empty() {
        let router = Router::new().route("/api/generate", post(|| async { Json(json!({ "done": true })) }));
        let url = spawn(router).await;

        let text = client(&url, 1)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let url = closed_url().await;

        let err = client(&url, 1)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::NetworkError(_)));
    }
}
