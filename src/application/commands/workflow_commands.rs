//! Workflow Commands

/// 完整工作流命令：风格分析 -> 仿写 -> 排版 -> 手写渲染
#[derive(Debug, Clone, Default)]
pub struct RunWorkflow {
    pub topic: String,
    pub style_sample: Option<String>,
    pub handwriting_image: Option<String>,
    pub steps: Option<u32>,
    pub guidance_scale: Option<f64>,
    pub max_segment_chars: Option<usize>,
}
