//! 栅格图片
//!
//! 图片在服务边界上以带 `data:image/png;base64,` 前缀的 PNG 传输

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ::image::{ImageFormat, Rgba, RgbaImage};

use super::errors::ImageCodecError;

const DATA_URI_IMAGE_PREFIX: &str = "data:image/";
const DATA_URI_BASE64_MARKER: &str = ";base64,";
const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// 去掉 `data:image/<type>;base64,` 前缀，返回纯 Base64 数据
///
/// `<type>` 只接受字母、数字和下划线；其他输入原样返回
pub fn strip_data_uri_prefix(data: &str) -> &str {
    let Some(rest) = data.strip_prefix(DATA_URI_IMAGE_PREFIX) else {
        return data;
    };
    let Some(pos) = rest.find(DATA_URI_BASE64_MARKER) else {
        return data;
    };

    let mime_subtype = &rest[..pos];
    let valid = !mime_subtype.is_empty()
        && mime_subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        &rest[pos + DATA_URI_BASE64_MARKER.len()..]
    } else {
        data
    }
}

/// 栅格图片（RGBA8）
///
/// 拼接时只读取输入图片，结果写入新的画布
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// 纯色图片
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    /// 从原始 RGBA8 像素构建
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageCodecError> {
        RgbaImage::from_raw(width, height, data)
            .map(Self::new)
            .ok_or(ImageCodecError::InvalidBuffer { width, height })
    }

    /// 从编码后的图片字节（PNG/JPEG/WebP）解码
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCodecError> {
        let decoded =
            ::image::load_from_memory(bytes).map_err(|e| ImageCodecError::Decode(e.to_string()))?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// 从 Base64（可带 data URI 前缀）解码
    pub fn from_base64(data: &str) -> Result<Self, ImageCodecError> {
        let payload = strip_data_uri_prefix(data.trim());
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ImageCodecError::Base64(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// 编码为 PNG 字节
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageCodecError> {
        let mut buf = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| ImageCodecError::Encode(e.to_string()))?;
        Ok(buf)
    }

    /// 编码为 `data:image/png;base64,...`
    pub fn to_data_uri(&self) -> Result<String, ImageCodecError> {
        let png = self.to_png_bytes()?;
        Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_uri_prefix() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri_prefix("data:image/jpeg;base64,BBBB"), "BBBB");
        assert_eq!(strip_data_uri_prefix("AAAA"), "AAAA");
        assert_eq!(
            strip_data_uri_prefix("data:image/svg+xml;base64,CCCC"),
            "data:image/svg+xml;base64,CCCC"
        );
        assert_eq!(
            strip_data_uri_prefix("data:text/plain;base64,DDDD"),
            "data:text/plain;base64,DDDD"
        );
    }

    #[test]
    fn test_data_uri_round_trip_keeps_pixels() {
        let img = RasterImage::filled(3, 2, [10, 20, 30, 255]);
        let uri = img.to_data_uri().unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        let decoded = RasterImage::from_base64(&uri).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(matches!(
            RasterImage::from_base64("not base64!!"),
            Err(ImageCodecError::Base64(_))
        ));
        // 合法 Base64 但不是图片
        assert!(matches!(
            RasterImage::from_base64("aGVsbG8="),
            Err(ImageCodecError::Decode(_))
        ));
    }

    #[test]
    fn test_from_rgba_checks_buffer_size() {
        assert!(RasterImage::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            RasterImage::from_rgba(2, 2, vec![0; 3]),
            Err(ImageCodecError::InvalidBuffer { width: 2, height: 2 })
        ));
    }
}
