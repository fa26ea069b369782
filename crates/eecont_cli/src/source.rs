//! Directory-backed source transport.

use eecont_core::EntityKind;
use eecont_sync::{SourceTransport, SyncError, SyncResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads raw batches from `<dir>/<kind>.json`.
///
/// A missing file fails the fetch, which aborts the run.
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    dir: PathBuf,
}

impl DirectoryTransport {
    /// Creates a transport over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the batch file for `kind`.
    pub fn batch_path(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(format!("{kind}.json"))
    }

    fn read(path: &Path) -> SyncResult<Value> {
        let text = fs::read_to_string(path)
            .map_err(|e| SyncError::transport(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| SyncError::transport(format!("{}: {e}", path.display())))
    }
}

impl SourceTransport for DirectoryTransport {
    fn fetch(&self, kind: EntityKind) -> SyncResult<Value> {
        let path = self.batch_path(kind);
        tracing::debug!(path = %path.display(), "reading batch");
        Self::read(&path)
    }
}
