//! Image Context - Errors

use thiserror::Error;

/// 图片拼接错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("没有可拼接的图片")]
    EmptyInput,

    #[error("拼接画布过大: {width}x{height}")]
    CanvasTooLarge { width: u64, height: u64 },
}

/// 图片编解码错误
#[derive(Debug, Error)]
pub enum ImageCodecError {
    #[error("Base64 解码失败: {0}")]
    Base64(String),

    #[error("图片解码失败: {0}")]
    Decode(String),

    #[error("图片编码失败: {0}")]
    Encode(String),

    #[error("像素数据与尺寸不匹配: {width}x{height}")]
    InvalidBuffer { width: u32, height: u32 },
}
