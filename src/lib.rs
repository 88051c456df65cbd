//! Handscribe - 风格仿写与手写图片生成服务
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Style Context: 写作风格特征提取（Style DNA）
//! - Article Context: 大纲解析、提示词模板
//! - Image Context: 图片编解码与垂直拼接
//! - 文本分段、行宽排版
//!
//! 应用层 (application/):
//! - Ports: CompletionEngine, HandwritingRenderer
//! - Commands: 风格分析、仿写、手写生成、完整工作流
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API
//! - Adapters: Ollama 兼容补全客户端、手写服务客户端、占位图渲染器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
