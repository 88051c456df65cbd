//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `HANDSCRIBE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `HANDSCRIBE_SERVER__PORT=8080`
/// - `HANDSCRIBE_COMPLETION__URL=http://ollama:11434`
/// - `HANDSCRIBE_HANDWRITING__URL=http://renderer:7860/coze/generate`
/// - `HANDSCRIBE_HANDWRITING__ENABLED=false`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("completion.url", "http://localhost:11434")?
        .set_default("completion.model", "ghostwriter")?
        .set_default("completion.max_retries", 2)?
        .set_default("completion.retry_delay_ms", 1000)?
        .set_default("handwriting.enabled", true)?
        .set_default("handwriting.url", "http://localhost:7860/coze/generate")?
        .set_default("handwriting.max_retries", 2)?
        .set_default("handwriting.retry_delay_ms", 1000)?
        .set_default("handwriting.steps", 12)?
        .set_default("handwriting.max_segment_chars", 200)?
        .set_default("handwriting.line_length", 40)?
        .set_default("handwriting.max_concurrent", 1)?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("HANDSCRIBE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.completion.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Completion URL cannot be empty".to_string(),
        ));
    }

    if config.completion.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Completion model cannot be empty".to_string(),
        ));
    }

    if config.completion.max_retries == 0 || config.handwriting.max_retries == 0 {
        return Err(ConfigError::ValidationError(
            "max_retries must be at least 1".to_string(),
        ));
    }

    let hw = &config.handwriting;
    if hw.enabled && hw.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Handwriting URL cannot be empty when handwriting is enabled".to_string(),
        ));
    }

    if hw.max_segment_chars == 0 || hw.line_length == 0 || hw.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "max_segment_chars, line_length and max_concurrent must be positive".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Completion URL: {}", config.completion.url);
    tracing::info!("Completion Model: {}", config.completion.model);
    tracing::info!(
        "Completion Retries: {} (delay {}ms)",
        config.completion.max_retries,
        config.completion.retry_delay_ms
    );
    match config.completion.timeout_secs {
        Some(secs) => tracing::info!("Completion Timeout: {}s", secs),
        None => tracing::info!("Completion Timeout: none"),
    }
    tracing::info!("Handwriting Enabled: {}", config.handwriting.enabled);
    if config.handwriting.enabled {
        tracing::info!("Handwriting URL: {}", config.handwriting.url);
        tracing::info!(
            "Handwriting Retries: {} (delay {}ms)",
            config.handwriting.max_retries,
            config.handwriting.retry_delay_ms
        );
    }
    tracing::info!(
        "Segmentation: max {} chars, line length {}, concurrency {}",
        config.handwriting.max_segment_chars,
        config.handwriting.line_length,
        config.handwriting.max_concurrent
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_completion_url() {
        let mut config = AppConfig::default();
        config.completion.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_segment_chars() {
        let mut config = AppConfig::default();
        config.handwriting.max_segment_chars = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_disabled_handwriting_allows_empty_url() {
        let mut config = AppConfig::default();
        config.handwriting.enabled = false;
        config.handwriting.url = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[completion]
model = "mimic"
paragraph_temperature = 1.1

[handwriting]
max_concurrent = 4

[style]
dash_density = 0.05
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.completion.model, "mimic");
        assert_eq!(config.completion.paragraph_temperature, 1.1);
        assert_eq!(config.completion.outline_temperature, 0.7);
        assert_eq!(config.handwriting.max_concurrent, 4);
        assert_eq!(config.style.dash_density, 0.05);
        assert_eq!(config.style.semicolon_density, 0.005);
    }
}
