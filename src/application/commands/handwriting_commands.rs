//! Handwriting Commands

/// 生成手写图片命令
///
/// 未提供的参数使用配置中的默认值
#[derive(Debug, Clone, Default)]
pub struct GenerateHandwriting {
    pub input_text: String,
    /// 手写风格参考图，可带 `data:image/...;base64,` 前缀
    pub style_image: Option<String>,
    pub steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    pub max_segment_chars: Option<usize>,
}
