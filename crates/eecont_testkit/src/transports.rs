//! Scripted transports for the sync engine and the shipment client.

use crate::fixtures;
use eecont_core::EntityKind;
use eecont_request::{RequestError, RequestResult, ShipmentTransport, ShippingRequest};
use eecont_sync::{SourceTransport, SyncError, SyncResult};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;

/// What a scripted kind returns.
#[derive(Debug, Clone)]
enum Script {
    Batch(Value),
    Fail(String),
}

/// A source transport replaying canned batches and recording fetches.
///
/// Kinds without a script fetch as an empty array.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: HashMap<EntityKind, Script>,
    fetched: Mutex<Vec<EntityKind>>,
}

impl ScriptedTransport {
    /// Creates a transport with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport serving the fixture batch for every kind.
    pub fn with_fixtures() -> Self {
        EntityKind::DEPENDENCY_ORDER
            .into_iter()
            .fold(Self::new(), |transport, kind| {
                transport.with_batch(kind, fixtures::records(kind))
            })
    }

    /// Serves `batch` for `kind`.
    pub fn with_batch(mut self, kind: EntityKind, batch: Value) -> Self {
        self.scripts.insert(kind, Script::Batch(batch));
        self
    }

    /// Fails every fetch of `kind` with a transport error.
    pub fn with_failure(mut self, kind: EntityKind, message: impl Into<String>) -> Self {
        self.scripts.insert(kind, Script::Fail(message.into()));
        self
    }

    /// Kinds fetched so far, in fetch order.
    pub fn fetched(&self) -> Vec<EntityKind> {
        self.fetched.lock().clone()
    }
}

impl SourceTransport for ScriptedTransport {
    fn fetch(&self, kind: EntityKind) -> SyncResult<Value> {
        self.fetched.lock().push(kind);
        match self.scripts.get(&kind) {
            Some(Script::Batch(batch)) => Ok(batch.clone()),
            Some(Script::Fail(message)) => Err(SyncError::transport(message.clone())),
            None => Ok(Value::Array(Vec::new())),
        }
    }
}

/// A shipment transport capturing submitted payloads.
///
/// Every submission is answered with the same canned response.
#[derive(Debug)]
pub struct RecordingShipper {
    response: Result<Value, String>,
    submitted: Mutex<Vec<Value>>,
}

impl RecordingShipper {
    /// Answers every submission with `response`.
    pub fn new(response: Value) -> Self {
        Self {
            response: Ok(response),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Fails every submission with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Answers with a priced quote.
    pub fn quoting(total: &str, delivery_date: &str) -> Self {
        Self::new(json!({
            "result": {"e": {
                "loading_price": {"total": total},
                "delivery_date": delivery_date,
                "error": ""
            }}
        }))
    }

    /// Answers with a validation error.
    pub fn rejecting(error: &str) -> Self {
        Self::new(json!({"result": {"e": {"error": error}}}))
    }

    /// Submitted requests as JSON, oldest first.
    pub fn submitted(&self) -> Vec<Value> {
        self.submitted.lock().clone()
    }

    /// The most recent submitted request.
    pub fn last(&self) -> Option<Value> {
        self.submitted.lock().last().cloned()
    }
}

impl ShipmentTransport for RecordingShipper {
    fn submit(&self, request: &ShippingRequest) -> RequestResult<Value> {
        self.submitted.lock().push(serde_json::to_value(request)?);
        self.response
            .clone()
            .map_err(|message| RequestError::transport(message))
    }
}
