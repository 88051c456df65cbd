//! Style Command Handlers

use crate::application::commands::AnalyzeStyle;
use crate::application::error::ApplicationError;
use crate::domain::style::{describe_style_dna, StyleAnalyzer, StyleDna};

/// 风格分析响应
#[derive(Debug, Clone)]
pub struct AnalyzeStyleResponse {
    pub style_dna: StyleDna,
    /// 中文可读描述
    pub description: String,
}

/// AnalyzeStyle Handler
#[derive(Debug, Clone)]
pub struct AnalyzeStyleHandler {
    analyzer: StyleAnalyzer,
}

impl AnalyzeStyleHandler {
    pub fn new(analyzer: StyleAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn handle(&self, command: AnalyzeStyle) -> Result<AnalyzeStyleResponse, ApplicationError> {
        let style_dna = self.analyzer.analyze(&command.text)?;
        let description = describe_style_dna(&style_dna);

        tracing::info!(
            avg_sentence_length = style_dna.avg_sentence_length,
            vocabulary_level = style_dna.vocabulary_level.as_str(),
            tone = style_dna.tone.as_str(),
            "Style analyzed"
        );

        Ok(AnalyzeStyleResponse {
            style_dna,
            description,
        })
    }

    /// 可选样本：空白或缺失时返回 None
    pub fn analyze_sample(&self, sample: Option<&str>) -> Result<Option<StyleDna>, ApplicationError> {
        match sample.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => Ok(Some(self.analyzer.analyze(text)?)),
            None => Ok(None),
        }
    }
}
