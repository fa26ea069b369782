//! # eecont testkit
//!
//! Test utilities for eecont.
//!
//! This crate provides:
//! - Raw provider records for every entity kind, consistent across kinds
//! - Scripted transports for the sync engine and the shipment client
//! - Property-based generators for raw records
//! - Temporary snapshot stores
//!
//! ## Usage
//!
//! ```rust
//! use eecont_core::MemoryStore;
//! use eecont_sync::{SyncConfig, SyncEngine};
//! use eecont_testkit::ScriptedTransport;
//! use std::sync::Arc;
//!
//! let engine = SyncEngine::new(
//!     SyncConfig::new(),
//!     ScriptedTransport::with_fixtures(),
//!     Arc::new(MemoryStore::new()),
//! );
//! let report = engine.run().unwrap();
//! assert_eq!(report.total_failed(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod store;
pub mod transports;

pub use store::TestStore;
pub use transports::{RecordingShipper, ScriptedTransport};
