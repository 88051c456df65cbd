//! 图片垂直拼接
//!
//! 按输入顺序自上而下堆叠，宽度不足的图片水平居中，背景为白色

use ::image::{imageops, Rgba, RgbaImage};

use super::errors::CompositionError;
use super::raster::RasterImage;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 单张图片在画布上的位置（左上角）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

/// 拼接画布布局
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

/// 计算堆叠布局
///
/// - 画布宽度 = 最大宽度，高度 = 高度之和
/// - y = 之前所有图片高度之和，x = floor((最大宽度 - 宽度) / 2)
pub fn stack_layout(sizes: &[(u32, u32)]) -> Result<CanvasLayout, CompositionError> {
    if sizes.is_empty() {
        return Err(CompositionError::EmptyInput);
    }

    let width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
    let total_height: u64 = sizes.iter().map(|&(_, h)| u64::from(h)).sum();
    let height = u32::try_from(total_height).map_err(|_| CompositionError::CanvasTooLarge {
        width: u64::from(width),
        height: total_height,
    })?;

    let mut placements = Vec::with_capacity(sizes.len());
    let mut y = 0u32;
    for &(w, h) in sizes {
        placements.push(Placement {
            x: (width - w) / 2,
            y,
        });
        y += h;
    }

    Ok(CanvasLayout {
        width,
        height,
        placements,
    })
}

/// 垂直拼接图片
///
/// - 空输入返回 `CompositionError::EmptyInput`
/// - 单张图片原样返回
/// - 多张图片绘制到新的白色画布上，不缩放、不裁剪、不重叠
pub fn composite(mut images: Vec<RasterImage>) -> Result<RasterImage, CompositionError> {
    if images.len() == 1 {
        if let Some(only) = images.pop() {
            return Ok(only);
        }
    }

    let sizes: Vec<(u32, u32)> = images.iter().map(|img| (img.width(), img.height())).collect();
    let layout = stack_layout(&sizes)?;

    let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, BACKGROUND);
    for (img, placement) in images.iter().zip(&layout.placements) {
        imageops::overlay(
            &mut canvas,
            img.pixels(),
            i64::from(placement.x),
            i64::from(placement.y),
        );
    }

    tracing::debug!(
        images = images.len(),
        width = layout.width,
        height = layout.height,
        "Images composited"
    );

    Ok(RasterImage::new(canvas))
}
