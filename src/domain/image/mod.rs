//! Image Context - 手写图片
//!
//! 职责:
//! - 栅格图片值对象与 Base64/PNG 编解码
//! - 多段图片的垂直拼接

mod compositor;
mod errors;
mod raster;

pub use compositor::{composite, stack_layout, CanvasLayout, Placement};
pub use errors::{CompositionError, ImageCodecError};
pub use raster::{strip_data_uri_prefix, RasterImage};
