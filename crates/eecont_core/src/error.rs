//! Error types for eecont core.

use crate::kind::EntityKind;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while normalizing, resolving or storing records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field codec rejected its input.
    #[error("codec error: {0}")]
    Codec(#[from] eecont_codec::CodecError),

    /// A field value is malformed.
    #[error("validation failed: {message}")]
    Validation {
        /// Description of the validation error.
        message: String,
    },

    /// A numeric field could not be coerced to an integer.
    #[error("cannot coerce field {field:?} to an integer: {value}")]
    Coercion {
        /// Provider field name.
        field: String,
        /// The offending value, rendered as JSON.
        value: String,
    },

    /// A required field is absent from the raw record.
    #[error("missing field {field:?}")]
    MissingField {
        /// Provider field name.
        field: String,
    },

    /// No persisted entity exists for a referenced business key.
    #[error("{kind} not found for key {key}")]
    ReferenceNotFound {
        /// Kind of the referenced entity.
        kind: EntityKind,
        /// The business key that failed to resolve.
        key: String,
    },

    /// A stored row disappeared between lookup and update.
    #[error("{kind} row {id} not found")]
    RowNotFound {
        /// Kind of the row.
        kind: EntityKind,
        /// Surrogate row id.
        id: u64,
    },

    /// Snapshot file is unreadable or was written by another format version.
    #[error("snapshot error: {message}")]
    Snapshot {
        /// Description of the snapshot problem.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a coercion error for `field`.
    pub fn coercion(field: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::Coercion {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a reference-not-found error.
    pub fn reference_not_found(kind: EntityKind, key: impl ToString) -> Self {
        Self::ReferenceNotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Creates a snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    /// Returns true if the failure concerns a single record and the
    /// surrounding batch may continue.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            CoreError::Codec(_)
                | CoreError::Validation { .. }
                | CoreError::Coercion { .. }
                | CoreError::MissingField { .. }
                | CoreError::ReferenceNotFound { .. }
        )
    }
}
