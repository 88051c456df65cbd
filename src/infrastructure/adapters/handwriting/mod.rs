//! Handwriting Adapter - 手写渲染实现

mod http_handwriting_client;
mod placeholder_renderer;

pub use http_handwriting_client::*;
pub use placeholder_renderer::{PlaceholderRenderer, PlaceholderRendererConfig};
