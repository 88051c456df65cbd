//! HTTP Handlers

mod article;
mod handwriting;
mod ping;
mod style;
mod workflow;

pub use article::*;
pub use handwriting::*;
pub use ping::*;
pub use style::*;
pub use workflow::*;
