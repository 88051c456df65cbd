//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Style Context: 风格分析
//! - Article Context: 大纲与提示词
//! - Image Context: 栅格图片与拼接
//!
//! 以及共享的文本工具（分段、折行）

pub mod article;
pub mod image;
pub mod style;

mod line_wrapper;
mod text_segmenter;

pub use line_wrapper::{wrap_lines, DEFAULT_LINE_LENGTH};
pub use text_segmenter::{segment_text, SegmentConfig, DEFAULT_MAX_CHARS};
