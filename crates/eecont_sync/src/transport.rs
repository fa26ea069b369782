//! Transport abstraction for fetching raw provider batches.

use crate::error::{SyncError, SyncResult};
use eecont_core::EntityKind;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// A source transport fetches raw reference data from the provider.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, files on disk, mock for testing, etc.).
pub trait SourceTransport: Send + Sync {
    /// Fetches the raw batch for `kind`: a single record or an array of
    /// records in the provider's field naming.
    fn fetch(&self, kind: EntityKind) -> SyncResult<Value>;
}

/// A mock transport for testing.
///
/// Kinds without a canned batch fetch as an empty array.
#[derive(Debug)]
pub struct MockTransport {
    batches: Mutex<HashMap<EntityKind, Value>>,
    connected: Mutex<bool>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(HashMap::new()),
            connected: Mutex::new(true),
        }
    }

    /// Sets the batch returned for `kind`.
    pub fn set_batch(&self, kind: EntityKind, batch: Value) {
        self.batches.lock().insert(kind, batch);
    }

    /// Sets the connected state.
    pub fn set_connected(&self, connected: bool) {
        *self.connected.lock() = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTransport for MockTransport {
    fn fetch(&self, kind: EntityKind) -> SyncResult<Value> {
        if !*self.connected.lock() {
            return Err(SyncError::transport("not connected"));
        }
        Ok(self
            .batches
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }
}
