//! Application State
//!
//! 包含所有 Command Handlers 的应用状态，请求之间不共享可变数据

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AnalyzeStyleHandler, ArticlePipeline, GenerateArticleHandler, GenerateHandwritingHandler,
    RunWorkflowHandler,
    // Settings
    GenerationSettings, HandwritingSettings,
    // Ports
    CompletionEnginePort, HandwritingRendererPort,
};
use crate::domain::style::{StyleAnalyzer, StyleThresholds};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub completion_engine: Arc<dyn CompletionEnginePort>,
    pub handwriting_renderer: Arc<dyn HandwritingRendererPort>,

    // ========== Command Handlers ==========
    pub analyze_style_handler: AnalyzeStyleHandler,
    pub generate_article_handler: GenerateArticleHandler,
    pub generate_handwriting_handler: GenerateHandwritingHandler,
    pub run_workflow_handler: RunWorkflowHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `placeholder_renderer` 用于手写服务失败时的降级渲染
    pub fn new(
        completion_engine: Arc<dyn CompletionEnginePort>,
        handwriting_renderer: Arc<dyn HandwritingRendererPort>,
        placeholder_renderer: Arc<dyn HandwritingRendererPort>,
        style_thresholds: StyleThresholds,
        generation_settings: GenerationSettings,
        handwriting_settings: HandwritingSettings,
        line_length: usize,
    ) -> Self {
        let analyze_style_handler = AnalyzeStyleHandler::new(StyleAnalyzer::new(style_thresholds));
        let generate_article_handler = GenerateArticleHandler::new(
            analyze_style_handler.clone(),
            ArticlePipeline::new(completion_engine.clone(), generation_settings),
        );
        let generate_handwriting_handler = GenerateHandwritingHandler::new(
            handwriting_renderer.clone(),
            placeholder_renderer,
            handwriting_settings,
        );
        let run_workflow_handler = RunWorkflowHandler::new(
            generate_article_handler.clone(),
            generate_handwriting_handler.clone(),
            line_length,
        );

        Self {
            // Ports
            completion_engine,
            handwriting_renderer,

            // Command handlers
            analyze_style_handler,
            generate_article_handler,
            generate_handwriting_handler,
            run_workflow_handler,
        }
    }
}
