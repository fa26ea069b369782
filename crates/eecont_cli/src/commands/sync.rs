//! Sync command implementation.

use crate::source::DirectoryTransport;
use eecont_core::MemoryStore;
use eecont_sync::{SyncConfig, SyncEngine, SyncReport};
use std::path::Path;
use std::sync::Arc;

/// Runs the sync command.
pub fn run(
    source: &Path,
    store_path: Option<&Path>,
    kinds: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let report = execute(source, store_path, kinds)?;

    for kind in &report.kinds {
        println!("{kind}");
    }
    if report.total_failed() > 0 {
        println!("{} record(s) skipped, see the log for details", report.total_failed());
    }

    Ok(())
}

/// Syncs `source` into the snapshot at `store_path`, if any.
///
/// The snapshot is only written when every kind completed.
pub fn execute(
    source: &Path,
    store_path: Option<&Path>,
    kinds: &[String],
) -> Result<SyncReport, Box<dyn std::error::Error>> {
    let config = SyncConfig::new().with_kind_names(kinds)?;
    let store = match store_path {
        Some(path) => MemoryStore::open(path)?,
        None => MemoryStore::new(),
    };

    let engine = SyncEngine::new(config, DirectoryTransport::new(source), Arc::new(store));
    let report = engine.run()?;

    if let Some(path) = store_path {
        engine.store().save_snapshot(path)?;
        tracing::info!(path = %path.display(), "snapshot saved");
    }

    Ok(report)
}
