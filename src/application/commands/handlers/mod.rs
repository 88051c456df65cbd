//! Command Handlers 实现

mod article_handlers;
mod handwriting_handlers;
mod style_handlers;
mod workflow_handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use article_handlers::*;
pub use handwriting_handlers::*;
pub use style_handlers::*;
pub use workflow_handlers::*;
