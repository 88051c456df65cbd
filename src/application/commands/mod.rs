//! 应用层 - 命令
//!
//! 每个用例一个命令，处理器在 handlers 中

mod article_commands;
mod handwriting_commands;
mod style_commands;
mod workflow_commands;

pub mod handlers;

pub use article_commands::*;
pub use handwriting_commands::*;
pub use style_commands::*;
pub use workflow_commands::*;
