//! Stores backed by a temporary snapshot file.

use eecont_core::{CoreResult, MemoryStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A memory store with a snapshot path in a temporary directory.
pub struct TestStore {
    /// The store instance.
    pub store: Arc<MemoryStore>,
    snapshot: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let snapshot = temp_dir.path().join("store.cbor");
        Self {
            store: Arc::new(MemoryStore::new()),
            snapshot,
            _temp_dir: temp_dir,
        }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot
    }

    /// Writes the snapshot.
    pub fn save(&self) -> CoreResult<()> {
        self.store.save_snapshot(&self.snapshot)
    }

    /// Replaces the store with one read back from the snapshot.
    pub fn reload(&mut self) -> CoreResult<()> {
        self.store = Arc::new(MemoryStore::load_snapshot(&self.snapshot)?);
        Ok(())
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = MemoryStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}
