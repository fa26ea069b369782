//! # eecont sync
//!
//! Synchronization engine for provider reference data.
//!
//! This crate provides:
//! - The [`SourceTransport`] capability fetching raw batches per kind
//! - [`SyncEngine`] running fetch, transform, resolve and upsert per kind
//! - Per-record failure isolation with a [`SyncReport`] of what happened
//!
//! ## Architecture
//!
//! Kinds are synced in dependency order so every reference resolves:
//! 1. Fetch the raw batch for the kind
//! 2. Transform each record into its canonical entity
//! 3. Resolve business-key references against the store
//! 4. Upsert by business key (create if absent, else overwrite)
//!
//! ## Key Invariants
//!
//! - One bad record never aborts its batch or later kinds
//! - Transport and storage failures abort the run
//! - Upserts are idempotent per business key

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod applier;
mod config;
mod engine;
mod error;
mod transport;

pub use applier::{StoreApplier, Upsert};
pub use config::SyncConfig;
pub use engine::{KindReport, SyncEngine, SyncReport};
pub use error::{SyncError, SyncResult};
pub use transport::{MockTransport, SourceTransport};
