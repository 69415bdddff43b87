//! Error types for interchange operations.

use thiserror::Error;

/// Errors that can occur while importing or exporting a project.
///
/// Only document-level failures surface here. Dangling names and unknown
/// enumerated values are tolerated on import and left to the validator.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Invalid element type or structure.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// Input or output bytes are not UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl InterchangeError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }

    /// Create an invalid document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "document",
            message: message.into(),
        }
    }
}
