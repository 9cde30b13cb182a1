//! Core building blocks for diagram translation
//!
//! The XML tree, error types, translation options and logging live here;
//! the translation stages themselves are in [`crate::pipeline`].

mod error;
pub mod logging;
mod types;
mod xml;

pub use error::*;
pub use logging::*;
pub use types::*;
pub use xml::*;
