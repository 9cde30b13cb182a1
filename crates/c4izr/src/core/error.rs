//! Core error types for diagram translation
//!
//! This module defines the error types used throughout the translation pipeline.

use thiserror::Error;

/// Convenience alias for results produced by this crate
pub type Result<T> = std::result::Result<T, C4Error>;

/// Core error types for diagram translation
#[derive(Error, Debug)]
pub enum C4Error {
    #[error("Invalid XML format: {message}")]
    InputFormat { message: String },

    #[error("Serialization error: {message}")]
    Serialize { message: String },

    #[error("Unsupported input: {message}")]
    UnsupportedInput { message: String },

    #[error("Error processing element {id}: {message}")]
    Element { id: String, message: String },
}

impl C4Error {
    /// Create a new input format error
    pub fn input_format(message: impl Into<String>) -> Self {
        Self::InputFormat {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }

    /// Create a new unsupported input error
    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            message: message.into(),
        }
    }

    /// Create a new per-element error
    pub fn element(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Element {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error means the input could not be read as a tree
    pub fn is_input_format(&self) -> bool {
        matches!(self, Self::InputFormat { .. })
    }
}
