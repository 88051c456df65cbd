//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod completion;
pub mod handwriting;
mod http_support;

#[cfg(test)]
pub(crate) mod test_server;

pub use completion::*;
pub use handwriting::*;
