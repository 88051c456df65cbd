//! 文本分割器
//!
//! 将长文本切分为不超过最大字符数的片段，供手写渲染服务逐段处理。
//! 所有长度均按字符（char）计算。

/// 默认最大字符数
pub const DEFAULT_MAX_CHARS: usize = 200;

/// 句末分隔符（优先）
const PERIOD: char = '。';

/// 逗号分隔符（没有句号时使用）
const COMMA: char = '，';

/// 文本分割配置
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// 单个片段最大字符数
    pub max_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// 在分隔符之后切开，分隔符保留在前一段末尾
///
/// 最后一段可能为空字符串（文本以分隔符结尾时），与拼接还原无冲突
fn split_after(text: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == delimiter {
            let end = idx + ch.len_utf8();
            pieces.push(&text[start..end]);
            start = end;
        }
    }
    pieces.push(&text[start..]);

    pieces
}

/// 按固定字符数强制切分
fn force_split(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// 贪心合并：追加下一段会超过上限时开启新片段
fn accumulate(pieces: &[&str], max_chars: usize) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = piece.chars().count();

        if current_len + piece_len <= max_chars {
            current.push_str(piece);
            current_len += piece_len;
        } else {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            current.push_str(piece);
            current_len = piece_len;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// 对文本进行分段
///
/// 分段策略（按优先级）：
/// 1. 文本长度不超过 `max_chars` 时原样返回
/// 2. 按句号 `。` 切分并贪心合并
/// 3. 没有句号时按逗号 `，` 切分并贪心合并
/// 4. 没有任何自然边界时按 `max_chars` 强制切分
/// 5. 合并后仍超长的片段（单句本身超长）再强制切分
///
/// 保证：每个片段不超过 `max_chars`，所有片段按顺序拼接等于原文。
pub fn segment_text(text: &str, config: &SegmentConfig) -> Vec<String> {
    let max_chars = config.max_chars.max(1);

    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces = split_after(text, PERIOD);
    if pieces.len() <= 1 {
        pieces = split_after(text, COMMA);
    }
    if pieces.len() <= 1 {
        return force_split(text, max_chars);
    }

    accumulate(&pieces, max_chars)
        .into_iter()
        .flat_map(|segment| {
            if segment.chars().count() > max_chars {
                force_split(&segment, max_chars)
            } else {
                vec![segment]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_chars: usize) -> SegmentConfig {
        SegmentConfig { max_chars }
    }

    fn assert_lossless_and_bounded(text: &str, max_chars: usize) {
        let segments = segment_text(text, &config(max_chars));
        assert_eq!(segments.concat(), text);
        for seg in &segments {
            assert!(
                seg.chars().count() <= max_chars,
                "segment too long: {} ({} chars)",
                seg,
                seg.chars().count()
            );
        }
    }

    #[test]
    fn test_short_text_is_single_segment() {
        assert_eq!(segment_text("short", &config(200)), vec!["short"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(segment_text("", &config(10)), vec![""]);
    }

    #[test]
    fn test_splits_on_period_and_keeps_delimiter() {
        let text = "第一句话。第二句话。第三句话。";
        let segments = segment_text(text, &config(10));

        assert_eq!(segments, vec!["第一句话。第二句话。", "第三句话。"]);
    }

    #[test]
    fn test_falls_back_to_comma() {
        let text = "一二三四，五六七八，九十";
        let segments = segment_text(text, &config(6));

        assert_eq!(segments, vec!["一二三四，", "五六七八，", "九十"]);
    }

    #[test]
    fn test_force_split_without_boundaries() {
        let text = "abcdefghij";
        let segments = segment_text(text, &config(4));

        assert_eq!(segments, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_oversized_sentence_is_force_split() {
        let text = "短句。这是一个非常非常长的句子没有逗号。";
        let segments = segment_text(text, &config(5));

        assert_eq!(segments[0], "短句。");
        assert_lossless_and_bounded(text, 5);
    }

    #[test]
    fn test_latin_periods_are_not_boundaries() {
        // 只有全角句号/逗号是自然边界
        let text = "one. two. three. four.";
        let segments = segment_text(text, &config(8));

        assert_eq!(segments.concat(), text);
        assert_eq!(segments[0], "one. two");
    }

    #[test]
    fn test_lossless_and_bounded_for_mixed_inputs() {
        let samples = [
            "今天天气很好。我们去公园散步，看见了很多花。然后回家吃饭。",
            "没有句号但是有逗号，这里，那里，到处都是逗号，真的很多",
            "纯文本没有任何分隔符号的一段很长很长很长很长的文字",
            "混合 mixed text。with ascii，and 中文。",
            "。。。，，，",
        ];

        for text in samples {
            for max_chars in [1, 2, 3, 7, 13, 200] {
                assert_lossless_and_bounded(text, max_chars);
            }
        }
    }

    #[test]
    fn test_zero_max_chars_is_clamped() {
        let segments = segment_text("abc", &config(0));
        assert_eq!(segments, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_default_config() {
        let text = "测".repeat(DEFAULT_MAX_CHARS + 1);
        let segments = segment_text(&text, &SegmentConfig::default());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], "测");
    }
}
