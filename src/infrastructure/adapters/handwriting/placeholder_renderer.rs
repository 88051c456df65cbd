//! Placeholder Renderer - 手写服务不可用时的占位图
//!
//! 白底图片上用 SVG 文本绘制分段内容，经 resvg 栅格化

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{HandwritingRendererPort, RenderError, RenderRequest};
use crate::domain::image::RasterImage;
use crate::domain::wrap_lines;

/// 占位图配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRendererConfig {
    pub width: u32,
    pub min_height: u32,
    /// 首行基线的 y 坐标
    pub top_margin: u32,
    pub left_margin: u32,
    pub line_height: u32,
    pub font_size: u32,
    /// 每行字符数
    pub line_length: usize,
}

impl Default for PlaceholderRendererConfig {
    fn default() -> Self {
        Self {
            width: 800,
            min_height: 200,
            top_margin: 40,
            left_margin: 20,
            line_height: 28,
            font_size: 20,
            line_length: 40,
        }
    }
}

impl PlaceholderRendererConfig {
    /// 高度 = max(min_height, top_margin + 行数 * line_height)
    pub fn height_for(&self, lines: usize) -> u32 {
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        self.top_margin
            .saturating_add(lines.saturating_mul(self.line_height))
            .max(self.min_height)
    }
}

/// 占位图渲染器
pub struct PlaceholderRenderer {
    config: PlaceholderRendererConfig,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl PlaceholderRenderer {
    /// 创建渲染器并加载系统字体
    pub fn new(config: PlaceholderRendererConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        tracing::info!(
            fonts = db.len(),
            width = config.width,
            "PlaceholderRenderer initialized"
        );

        Self {
            config,
            fontdb: Arc::new(db),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PlaceholderRendererConfig::default())
    }

    fn build_svg(&self, lines: &[&str], height: u32) -> String {
        let c = &self.config;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="white"/><text font-family="cursive, serif" font-size="{fs}" fill="black">"#,
            w = c.width,
            h = height,
            fs = c.font_size,
        );

        let mut y = c.top_margin;
        for line in lines {
            svg.push_str(&format!(
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                c.left_margin,
                y,
                escape_xml(line)
            ));
            y = y.saturating_add(c.line_height);
        }

        svg.push_str("</text></svg>");
        svg
    }

    /// 同步渲染一段文本
    pub fn render_text(&self, text: &str) -> Result<RasterImage, RenderError> {
        if self.config.width == 0 {
            return Err(RenderError::Placeholder("width must be positive".to_string()));
        }

        let wrapped = wrap_lines(text, self.config.line_length);
        let lines: Vec<&str> = wrapped.lines().collect();
        let height = self.config.height_for(lines.len());
        let svg = self.build_svg(&lines, height);

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| RenderError::Placeholder(format!("parse svg: {}", e)))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.config.width, height)
            .ok_or_else(|| RenderError::Placeholder("failed to allocate pixmap".to_string()))?;
        resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let rgba: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        RasterImage::from_rgba(self.config.width, height, rgba)
            .map_err(|e| RenderError::Placeholder(e.to_string()))
    }
}

#[async_trait]
impl HandwritingRendererPort for PlaceholderRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<RasterImage, RenderError> {
        let image = self.render_text(&request.input_text)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "Placeholder image rendered"
        );
        Ok(image)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
