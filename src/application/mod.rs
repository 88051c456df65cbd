//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（CompletionEngine、HandwritingRenderer）
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    AnalyzeStyle,
    GenerateArticle,
    GenerateHandwriting,
    RunWorkflow,
    // Handlers
    handlers::{
        AnalyzeStyleHandler, AnalyzeStyleResponse, ArticlePipeline, GenerateArticleHandler,
        GenerateArticleResponse, GenerateHandwritingHandler, GenerateHandwritingResponse,
        GenerationSettings, HandwritingSettings, RunWorkflowHandler, RunWorkflowResponse,
    },
};

pub use error::{ApplicationError, GenerationError, GenerationStage};

pub use ports::{
    // Completion engine
    CompletionEnginePort,
    CompletionError,
    CompletionOptions,
    // Handwriting renderer
    HandwritingRendererPort,
    RenderError,
    RenderRequest,
};
