//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The stored or incoming value does not fit the field's shape.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the validation error.
        message: String,
    },
}

impl CodecError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CodecError::validation("bad mask");
        assert_eq!(err.to_string(), "validation failed: bad mask");
    }
}
