//! Error types for the sync engine.

use eecont_core::{CoreError, UnknownKind};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort a sync run.
///
/// Record-scoped failures never surface here; the engine counts them in
/// the report instead.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The provider transport failed.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// Storage or snapshot error.
    #[error("store error: {0}")]
    Core(#[from] CoreError),

    /// An allow-list entry names no entity kind.
    #[error("unknown entity kind: {0:?}")]
    UnknownKind(String),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<UnknownKind> for SyncError {
    fn from(err: UnknownKind) -> Self {
        Self::UnknownKind(err.0)
    }
}
