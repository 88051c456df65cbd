//! Style Context - Value Objects

use serde::{Deserialize, Serialize};

/// 词汇复杂度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyLevel {
    Simple,
    Moderate,
    High,
}

impl VocabularyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyLevel::Simple => "simple",
            VocabularyLevel::Moderate => "moderate",
            VocabularyLevel::High => "high",
        }
    }
}

/// 语气基调
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Critical,
    Positive,
    Neutral,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Critical => "critical",
            Tone::Positive => "positive",
            Tone::Neutral => "neutral",
        }
    }
}

/// 句式分布
///
/// 不变量: simple + compound + complex == 1.0（compound 为余量）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentenceStructures {
    pub simple: f64,
    pub compound: f64,
    pub complex: f64,
}

impl SentenceStructures {
    pub fn total(&self) -> f64 {
        self.simple + self.compound + self.complex
    }
}

/// Style DNA - 文本风格指纹
///
/// 每个风格样本计算一次，之后不可变。字段名与提示词中的 JSON 保持一致。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDna {
    /// 平均句长（字符数，保留一位小数）
    #[serde(rename = "avg_sent_len")]
    pub avg_sentence_length: f64,
    /// 常用过渡词（按词表顺序）
    pub transitions: Vec<String>,
    /// 语言习惯
    pub quirks: Vec<String>,
    /// 词汇复杂度
    pub vocabulary_level: VocabularyLevel,
    /// 句式分布
    pub sentence_structures: SentenceStructures,
    /// 语气基调
    pub tone: Tone,
}
