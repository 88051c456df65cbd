//! Article Context - 文章生成
//!
//! 职责:
//! - 大纲解析（解析失败时降级为固定大纲）
//! - 纯函数提示词模板
//! - 段落之间传递的滚动上下文

mod outline;
mod prompts;

pub use outline::{extract_json_array, fallback_outline, parse_outline, OutlineParse, OutlinePoint};
pub use prompts::{
    build_outline_prompt, build_paragraph_prompt, ParagraphPromptInput, RollingContext,
    CONTEXT_CHARS, DEFAULT_INSTRUCTION,
};
