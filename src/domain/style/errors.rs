//! Style Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("输入文本为空")]
    EmptyInput,

    #[error("无法识别句子，请检查文本格式")]
    NoSentences,
}
