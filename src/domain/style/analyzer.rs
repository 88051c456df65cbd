//! Style DNA 分析器
//!
//! 纯函数：从风格样本中提取句长、过渡词、语言习惯、词汇复杂度、句式分布与语气。
//! 所有长度按字符计算，中英文混排时同样适用。

use super::errors::StyleError;
use super::thresholds::StyleThresholds;
use super::value_objects::{SentenceStructures, StyleDna, Tone, VocabularyLevel};

/// 过渡词表（英文 + 中文），结果按此顺序输出
const TRANSITION_WORDS: &[&str] = &[
    "however",
    "thus",
    "therefore",
    "moreover",
    "furthermore",
    "in contrast",
    "nevertheless",
    "consequently",
    "hence",
    "besides",
    "meanwhile",
    "nonetheless",
    "然而",
    "因此",
    "此外",
    "所以",
    "不过",
    "总之",
    "但是",
    "可是",
    "而且",
    "于是",
    "况且",
    "反之",
    "实际上",
    "事实上",
];

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "wonderful", "好", "棒", "优秀"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "awful", "poor", "差", "糟糕", "坏"];
const FORMAL_WORDS: &[&str] = &["therefore", "consequently", "moreover", "因此", "所以", "从而"];
const CASUAL_WORDS: &[&str] = &["like", "gonna", "wanna", "哈哈", "呃", "那个"];

/// 没有发现过渡词时的占位
const NO_TRANSITIONS: &str = "common";
/// 没有发现语言习惯时的占位
const NO_QUIRKS: &str = "standard writing";

#[inline]
fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？')
}

#[inline]
fn has_comma(s: &str) -> bool {
    s.contains(',') || s.contains('，')
}

#[inline]
fn has_semicolon(s: &str) -> bool {
    s.contains(';') || s.contains('；')
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// 压缩连续空白并去除首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 统计词表中在文本里出现过的词数（不计出现次数）
fn count_present(text_lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text_lower.contains(*w)).count()
}

/// 统计由 ASCII 单词边界包围、且全部由字母组成的长单词
///
/// 只识别英文，中文等其他文字不计入复杂度
fn count_complex_words(text: &str, min_letters: usize) -> usize {
    let mut count = 0;
    let mut run_len = 0;
    let mut all_letters = true;

    for ch in text.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            run_len += 1;
            all_letters &= ch.is_ascii_alphabetic();
        } else {
            if all_letters && run_len >= min_letters {
                count += 1;
            }
            run_len = 0;
            all_letters = true;
        }
    }

    count
}

/// Style DNA 分析器
#[derive(Debug, Clone, Default)]
pub struct StyleAnalyzer {
    thresholds: StyleThresholds,
}

impl StyleAnalyzer {
    pub fn new(thresholds: StyleThresholds) -> Self {
        Self { thresholds }
    }

    /// 分析文本风格
    ///
    /// # 错误
    /// - `StyleError::EmptyInput` - 压缩空白后文本为空
    /// - `StyleError::NoSentences` - 分句后没有非空句子（例如只有标点）
    pub fn analyze(&self, text: &str) -> Result<StyleDna, StyleError> {
        let clean = normalize_whitespace(text);
        if clean.is_empty() {
            return Err(StyleError::EmptyInput);
        }

        let sentences: Vec<&str> = clean
            .split(is_sentence_terminator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            return Err(StyleError::NoSentences);
        }

        let lengths: Vec<usize> = sentences.iter().map(|s| s.chars().count()).collect();
        let sentence_count = sentences.len() as f64;
        let text_lower = clean.to_lowercase();

        let avg_sentence_length =
            round_to(lengths.iter().sum::<usize>() as f64 / sentence_count, 1);

        let transitions: Vec<String> = TRANSITION_WORDS
            .iter()
            .filter(|w| text_lower.contains(*w))
            .map(|w| w.to_string())
            .collect();

        let quirks = self.detect_quirks(&clean, &sentences, &lengths);
        let vocabulary_level = self.vocabulary_level(&clean, sentence_count);
        let sentence_structures = self.sentence_structures(&sentences, &lengths);
        let tone = self.tone(&text_lower);

        Ok(StyleDna {
            avg_sentence_length,
            transitions: if transitions.is_empty() {
                vec![NO_TRANSITIONS.to_string()]
            } else {
                transitions
            },
            quirks: if quirks.is_empty() {
                vec![NO_QUIRKS.to_string()]
            } else {
                quirks
            },
            vocabulary_level,
            sentence_structures,
            tone,
        })
    }

    fn detect_quirks(&self, clean: &str, sentences: &[&str], lengths: &[usize]) -> Vec<String> {
        let t = &self.thresholds;
        let mut quirks = Vec::new();
        let total = sentences.len() as f64;

        // 句首词偏好
        let starter_share = |word: &str| {
            let hits = sentences
                .iter()
                .filter(|s| {
                    s.split(' ')
                        .next()
                        .map(|first| first.to_lowercase() == word)
                        .unwrap_or(false)
                })
                .count();
            hits as f64 / total
        };
        if starter_share("and") > t.and_starter_ratio
            || starter_share("but") > t.other_starter_ratio
            || starter_share("但是") > t.other_starter_ratio
            || starter_share("然而") > t.other_starter_ratio
        {
            quirks.push("And/But starters".to_string());
        }

        // 标点密度
        let text_len = clean.chars().count() as f64;
        let density = |count: usize| count as f64 / text_len;
        let dashes = clean.matches('—').count() + clean.matches("--").count();
        let semicolons = clean.matches(';').count();
        let colons = clean.matches(':').count();
        let exclamations = clean.matches(|c: char| c == '!' || c == '！').count();

        if density(dashes) > t.dash_density {
            quirks.push("dash-heavy".to_string());
        }
        if density(semicolons) > t.semicolon_density {
            quirks.push("semicolon-heavy".to_string());
        }
        if density(colons) > t.colon_density {
            quirks.push("colon-heavy".to_string());
        }
        if density(exclamations) > t.exclamation_density {
            quirks.push("exclamation-heavy".to_string());
        }

        // 句长偏好
        let short = lengths.iter().filter(|&&l| l < t.short_sentence_chars).count();
        if short as f64 / total > t.short_sentence_ratio {
            quirks.push("short sentences".to_string());
        }
        let long = lengths.iter().filter(|&&l| l > t.long_sentence_chars).count();
        if long as f64 / total > t.long_sentence_ratio {
            quirks.push("long sentences".to_string());
        }

        quirks
    }

    fn vocabulary_level(&self, clean: &str, sentence_count: f64) -> VocabularyLevel {
        let ratio =
            count_complex_words(clean, self.thresholds.complex_word_letters) as f64 / sentence_count;

        if ratio > self.thresholds.high_vocabulary_ratio {
            VocabularyLevel::High
        } else if ratio > self.thresholds.moderate_vocabulary_ratio {
            VocabularyLevel::Moderate
        } else {
            VocabularyLevel::Simple
        }
    }

    fn sentence_structures(&self, sentences: &[&str], lengths: &[usize]) -> SentenceStructures {
        let total = sentences.len() as f64;
        let simple_count = sentences
            .iter()
            .zip(lengths)
            .filter(|&(s, &len)| !has_comma(s) && len < self.thresholds.simple_sentence_chars)
            .count();
        let complex_count = sentences
            .iter()
            .filter(|s| has_comma(s) && has_semicolon(s))
            .count();

        // compound 取余量，四舍五入后三者之和仍为 1
        let simple = round_to(simple_count as f64 / total, 2);
        let complex = round_to(complex_count as f64 / total, 2).min(1.0 - simple);
        let compound = round_to(1.0 - simple - complex, 2).max(0.0);

        SentenceStructures {
            simple,
            compound,
            complex,
        }
    }

    fn tone(&self, text_lower: &str) -> Tone {
        let positive = count_present(text_lower, POSITIVE_WORDS) as f64;
        let negative = count_present(text_lower, NEGATIVE_WORDS) as f64;
        let formal = count_present(text_lower, FORMAL_WORDS) as f64;
        let casual = count_present(text_lower, CASUAL_WORDS) as f64;
        let register = self.thresholds.register_multiplier;
        let sentiment = self.thresholds.sentiment_multiplier;

        if formal > casual * register {
            Tone::Formal
        } else if casual > formal * register {
            Tone::Casual
        } else if negative > positive * sentiment {
            Tone::Critical
        } else if positive > negative * sentiment {
            Tone::Positive
        } else {
            Tone::Neutral
        }
    }
}

/// 使用默认阈值分析（便捷方法）
pub fn analyze_style(text: &str) -> Result<StyleDna, StyleError> {
    StyleAnalyzer::default().analyze(text)
}

/// 生成 Style DNA 的可读描述（用于大纲提示词）
pub fn describe_style_dna(dna: &StyleDna) -> String {
    let percent = |v: f64| (v * 100.0).round() as i64;
    let top_transitions: Vec<&str> = dna.transitions.iter().take(5).map(String::as_str).collect();

    [
        format!("平均句长: {} 字符", dna.avg_sentence_length),
        format!("常用过渡词: {}", top_transitions.join(", ")),
        format!("语言习惯: {}", dna.quirks.join(", ")),
        format!("词汇复杂度: {}", dna.vocabulary_level.as_str()),
        format!("语气基调: {}", dna.tone.as_str()),
        format!(
            "句式分布: 简单句{}%, 复合句{}%, 复杂句{}%",
            percent(dna.sentence_structures.simple),
            percent(dna.sentence_structures.compound),
            percent(dna.sentence_structures.complex)
        ),
    ]
    .join("\n")
}
