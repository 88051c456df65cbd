//! Style Context - 写作风格上下文
//!
//! 职责:
//! - 从风格样本中提取 Style DNA（启发式文本特征）
//! - 生成供提示词使用的 Style DNA 描述

mod analyzer;
mod errors;
mod thresholds;
mod value_objects;

pub use analyzer::{analyze_style, describe_style_dna, StyleAnalyzer};
pub use errors::StyleError;
pub use thresholds::StyleThresholds;
pub use value_objects::{SentenceStructures, StyleDna, Tone, VocabularyLevel};
