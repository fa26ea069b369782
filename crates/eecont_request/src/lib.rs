//! # eecont request
//!
//! Outbound shipping requests to the provider.
//!
//! This crate provides:
//! - [`EecontConfig`]: account settings and default request templates
//! - [`RequestBuilder`]: receiver, shipment, services and system sections
//!   built from fresh template copies and caller overrides
//! - [`EecontClient`]: quotes, address validation and shipment creation
//!   over a [`ShipmentTransport`]
//!
//! ## Key Invariants
//!
//! - Templates are copied per call; overrides never leak between calls
//! - Payment on delivery is formatted as `units.minor` without padding
//! - Quotes fall back to configured defaults, never fail on a thin response

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod address;
mod builder;
mod client;
mod config;
mod error;

pub use address::{AddressParser, NoopAddressParser, ParsedAddress};
pub use builder::{format_payment, Loading, RequestBuilder, ShippingRequest};
pub use client::{dict_get, EecontClient, Quote, ShipmentTransport};
pub use config::{Defaults, EecontConfig, LoadingTemplate, Login, Template};
pub use error::{RequestError, RequestResult};
