//! # eecont core
//!
//! Canonical reference data for the provider's logistics network.
//!
//! This crate provides:
//! - Canonical entities ([`Zone`], [`Country`], [`City`], [`Quarter`],
//!   [`Street`], [`Region`], [`Office`]) keyed by provider business keys
//! - Transformers from raw provider records to canonical entities
//! - Relation resolution of business-key [`Link`]s against a store
//! - The [`Repository`] capability and an in-memory [`MemoryStore`]
//!
//! ## Key Invariants
//!
//! - Business keys are never null; all but office ids are unique
//! - References resolve to persisted entities or fail, never partially
//! - Service days always hold seven flags
//! - Office-code lists are ordered and never null
//! - Malformed timestamps degrade to a sentinel instead of failing

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entity;
mod error;
mod kind;
mod model;
mod resolve;
mod store;
pub mod transform;

pub use entity::{Entity, Link, RowId, Stored};
pub use error::{CoreError, CoreResult};
pub use kind::{EntityKind, UnknownKind};
pub use model::{
    AttachedOffices, City, Country, Office, OfficeRoutes, Quarter, Region, Route, ShipmentClass,
    Street, Zone,
};
pub use resolve::{resolve, Resolve};
pub use store::{MemoryStore, Repository, Store, Table};
pub use transform::{Transform, TransformOptions, Transformer};

pub use eecont_codec::{OfficeList, WeekDays, Weekday};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
