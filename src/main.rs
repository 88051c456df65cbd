//! Handscribe - 风格仿写与手写图片生成服务
//!
//! - Domain: style/, article/, image/, 文本分段与排版
//! - Application: commands, ports
//! - Infrastructure: http, adapters

use std::sync::Arc;

use handscribe::application::HandwritingRendererPort;
use handscribe::config::{load_config, print_config};
use handscribe::infrastructure::adapters::{
    HttpCompletionClient, HttpHandwritingClient, PlaceholderRenderer, PlaceholderRendererConfig,
};
use handscribe::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},handscribe={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Handscribe - 风格仿写与手写图片生成服务");
    print_config(&config);

    // 语言模型客户端
    let completion_engine = Arc::new(HttpCompletionClient::new(config.completion.client_config())?);

    // 占位图渲染器（手写服务失败或关闭时使用）
    let placeholder = Arc::new(PlaceholderRenderer::new(PlaceholderRendererConfig {
        line_length: config.handwriting.line_length,
        ..Default::default()
    }));

    let handwriting_renderer: Arc<dyn HandwritingRendererPort> = if config.handwriting.enabled {
        Arc::new(HttpHandwritingClient::new(config.handwriting.client_config())?)
    } else {
        tracing::warn!("Handwriting service disabled, all segments use placeholder images");
        placeholder.clone()
    };

    let state = AppState::new(
        completion_engine,
        handwriting_renderer,
        placeholder,
        config.style.clone(),
        config.completion.generation_settings(),
        config.handwriting.settings(),
        config.handwriting.line_length,
    );

    let server = HttpServer::new(&config.server, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
