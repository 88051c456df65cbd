//! 提示词模板
//!
//! 所有提示词由结构化输入纯函数生成，不依赖网络调用

use crate::domain::style::{describe_style_dna, StyleDna};

/// 默认段落生成指令
pub const DEFAULT_INSTRUCTION: &str =
    "Write the next logical unit in the user's style based on the outline point and previous context.";

/// 滚动上下文保留的字符数
pub const CONTEXT_CHARS: usize = 100;

const NO_STYLE_SAMPLE: &str = "[No style sample provided]";
const FIRST_PARAGRAPH: &str = "[First paragraph - no previous context]";

/// 段落之间传递的滚动上下文
///
/// 只保留上一段的前 `CONTEXT_CHARS` 个字符
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingContext(Option<String>);

impl RollingContext {
    /// 第一段：没有上文
    pub fn first() -> Self {
        Self(None)
    }

    /// 由上一段生成下一段的上下文
    pub fn after(paragraph: &str) -> Self {
        let head: String = paragraph.chars().take(CONTEXT_CHARS).collect();
        if head.is_empty() {
            Self(None)
        } else {
            Self(Some(head))
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// 段落提示词输入
#[derive(Debug, Clone)]
pub struct ParagraphPromptInput<'a> {
    pub instruction: &'a str,
    pub style_dna: Option<&'a StyleDna>,
    pub outline_point: &'a str,
    pub previous_context: &'a RollingContext,
}

/// 构建大纲提示词
pub fn build_outline_prompt(topic: &str, style_dna: Option<&StyleDna>) -> String {
    let style_description = style_dna
        .map(|dna| format!("\n\nStyle DNA to follow:\n{}", describe_style_dna(dna)))
        .unwrap_or_default();

    format!(
        r#"Create a structured outline for an article about: "{topic}"{style_description}

Return ONLY valid JSON format with the following structure:
[
  {{
    "index": 1,
    "point": "Main point description",
    "connection": "How it connects to previous paragraph"
  }}
]
Generate 5-7 logical paragraphs."#
    )
}

/// 构建段落提示词
pub fn build_paragraph_prompt(input: &ParagraphPromptInput<'_>) -> String {
    let style = input
        .style_dna
        .and_then(|dna| serde_json::to_string(dna).ok())
        .unwrap_or_else(|| NO_STYLE_SAMPLE.to_string());
    let context = input.previous_context.text().unwrap_or(FIRST_PARAGRAPH);

    format!(
        "### Instruction:\n{instruction}\n\n### Input:\n> - Style_DNA: {style}\n\nCurrent_Outline_Point: {point}\nPrevious_Context: {context}\n\n### Response:\n",
        instruction = input.instruction,
        point = input.outline_point,
    )
}
