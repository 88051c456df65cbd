//! 风格分析阈值
//!
//! 启发式阈值，全部可通过 `[style]` 配置段覆盖

use serde::Deserialize;

/// 风格分析阈值配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleThresholds {
    /// 以 "and" 开头的句子占比阈值
    pub and_starter_ratio: f64,
    /// 以 "but" / "但是" / "然而" 开头的句子占比阈值
    pub other_starter_ratio: f64,
    /// 破折号密度阈值
    pub dash_density: f64,
    /// 分号密度阈值
    pub semicolon_density: f64,
    /// 冒号密度阈值
    pub colon_density: f64,
    /// 感叹号密度阈值
    pub exclamation_density: f64,
    /// 短句长度上限（不含）
    pub short_sentence_chars: usize,
    /// 短句占比阈值
    pub short_sentence_ratio: f64,
    /// 长句长度下限（不含）
    pub long_sentence_chars: usize,
    /// 长句占比阈值
    pub long_sentence_ratio: f64,
    /// 复杂词最少字母数
    pub complex_word_letters: usize,
    /// 每句复杂词数超过该值为 high
    pub high_vocabulary_ratio: f64,
    /// 每句复杂词数超过该值为 moderate
    pub moderate_vocabulary_ratio: f64,
    /// 简单句长度上限（不含）
    pub simple_sentence_chars: usize,
    /// formal / casual 判定倍数
    pub register_multiplier: f64,
    /// critical / positive 判定倍数
    pub sentiment_multiplier: f64,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            and_starter_ratio: 0.2,
            other_starter_ratio: 0.15,
            dash_density: 0.01,
            semicolon_density: 0.005,
            colon_density: 0.005,
            exclamation_density: 0.008,
            short_sentence_chars: 15,
            short_sentence_ratio: 0.5,
            long_sentence_chars: 40,
            long_sentence_ratio: 0.3,
            complex_word_letters: 10,
            high_vocabulary_ratio: 2.0,
            moderate_vocabulary_ratio: 0.5,
            simple_sentence_chars: 30,
            register_multiplier: 2.0,
            sentiment_multiplier: 1.5,
        }
    }
}
