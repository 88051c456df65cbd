//! Article Commands

/// 仿写文章命令
#[derive(Debug, Clone)]
pub struct GenerateArticle {
    /// 文章主题（必填）
    pub topic: String,
    /// 风格样本，空白视为未提供
    pub style_sample: Option<String>,
    /// 段落生成指令，未提供时使用默认指令
    pub instruction: Option<String>,
}
