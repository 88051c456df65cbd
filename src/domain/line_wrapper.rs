//! 行宽重排
//!
//! 手写渲染前把文本按固定行宽重新折行，保证每行长度可控

/// 默认行宽（字符）
pub const DEFAULT_LINE_LENGTH: usize = 40;

/// 把文本按 `line_length` 折行，返回以 `\n` 连接的结果
///
/// 先把连续空白压缩为单个空格，然后贪心地把单词放入当前行；
/// 放不下时换行。单词本身超过行宽时按行宽强制切开，每段独占一行。
/// 不会丢弃任何非空白字符。
pub fn wrap_lines(text: &str, line_length: usize) -> String {
    let line_length = line_length.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let candidate_len = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if candidate_len <= line_length {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = candidate_len;
        } else if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            if word_len <= line_length {
                current.push_str(word);
                current_len = word_len;
            } else {
                lines.extend(split_word(word, line_length));
                current_len = 0;
            }
        } else {
            lines.extend(split_word(word, line_length));
            current_len = 0;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

fn split_word(word: &str, line_length: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(line_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
