//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod completion_engine;
mod handwriting_renderer;

pub use completion_engine::{CompletionEnginePort, CompletionError, CompletionOptions};
pub use handwriting_renderer::{HandwritingRendererPort, RenderError, RenderRequest};
