//! Completion Adapter - 语言模型 HTTP 客户端实现

mod http_completion_client;

pub use http_completion_client::*;
