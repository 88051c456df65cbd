//! Style Commands

/// 分析文本风格命令
#[derive(Debug, Clone)]
pub struct AnalyzeStyle {
    pub text: String,
}
