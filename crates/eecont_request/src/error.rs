//! Error types for request building.

use thiserror::Error;

/// Result type for request operations.
pub type RequestResult<T> = Result<T, RequestError>;

/// Errors that can occur while building or submitting a request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The shipment transport failed.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// A template node the builder writes into is not a mapping.
    #[error("template error: {message}")]
    Template {
        /// Error message.
        message: String,
    },

    /// A caller override has the wrong shape.
    #[error("invalid override {field:?}: {message}")]
    Override {
        /// Offending override key.
        field: String,
        /// Error message.
        message: String,
    },

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RequestError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a template error.
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Creates an override error.
    pub fn invalid_override(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Override {
            field: field.into(),
            message: message.into(),
        }
    }
}
