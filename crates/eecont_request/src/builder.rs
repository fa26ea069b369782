//! Shipment request payload assembly.
//!
//! Every section starts from a fresh copy of its template; caller
//! overrides are laid over the copy key by key. Nothing a caller passes
//! is ever written back into the templates.

use crate::address::{AddressParser, ParsedAddress};
use crate::config::{EecontConfig, LoadingTemplate, Template};
use crate::error::{RequestError, RequestResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Receiver, shipment and services sections of one shipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loading {
    /// Receiver section.
    pub receiver: Map<String, Value>,
    /// Shipment section.
    pub shipment: Map<String, Value>,
    /// Services section.
    pub services: Map<String, Value>,
}

/// A complete shipping request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingRequest {
    /// One loading per shipment.
    pub loadings: Vec<Loading>,
    /// System section.
    pub system: Map<String, Value>,
}

/// Formats minor currency units as `units.minor`.
///
/// The minor part is not zero-padded: 105 becomes `"1.5"`.
pub fn format_payment(amount: i64) -> String {
    format!("{}.{}", amount.div_euclid(100), amount.rem_euclid(100))
}

/// Builds request sections from templates and caller overrides.
#[derive(Clone)]
pub struct RequestBuilder {
    loading: LoadingTemplate,
    system: Template,
    parser: Arc<dyn AddressParser>,
}

impl RequestBuilder {
    /// Creates a builder over copies of the templates in `config`.
    pub fn new(config: &EecontConfig, parser: Arc<dyn AddressParser>) -> Self {
        Self {
            loading: config.loading.clone(),
            system: config.system.clone(),
            parser,
        }
    }

    /// Builds the receiver section.
    ///
    /// `phone_number` becomes `phone_num` (empty when absent) and `name`
    /// is copied to `name_person`. A text `address` is split by the
    /// address parser and kept whole in `street_other`; a mapping
    /// `address` is read directly.
    pub fn receiver(&self, overrides: &Map<String, Value>) -> RequestResult<Map<String, Value>> {
        let mut fields = overrides.clone();

        let phone = fields
            .remove("phone_number")
            .unwrap_or_else(|| Value::String(String::new()));
        fields.insert("phone_num".into(), phone);

        let name = fields
            .get("name")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        fields.insert("name_person".into(), name);

        let address = match fields.remove("address") {
            None | Some(Value::Null) => self.parse_text(""),
            Some(Value::String(text)) => self.parse_text(&text),
            Some(Value::Object(components)) => ParsedAddress::from_fields(&components),
            Some(other) => {
                return Err(RequestError::invalid_override(
                    "address",
                    format!("expected text or a mapping, got {other}"),
                ))
            }
        };

        let mut receiver = self.loading.receiver.clone();
        receiver.extend(fields);
        receiver.extend(address.into_receiver_fields());
        Ok(receiver)
    }

    fn parse_text(&self, text: &str) -> ParsedAddress {
        ParsedAddress {
            other: text.to_string(),
            ..self.parser.parse(text)
        }
    }

    /// Builds the shipment section.
    pub fn shipment(&self, overrides: &Map<String, Value>) -> RequestResult<Map<String, Value>> {
        let mut shipment = self.loading.shipment.clone();
        shipment.extend(overrides.clone());
        Ok(shipment)
    }

    /// Builds the services section.
    ///
    /// `payment` is the amount collected on delivery, in minor currency
    /// units (0 when absent). It is written to `cd.__content__`; other
    /// overrides are laid over the template as is.
    pub fn services(&self, overrides: &Map<String, Value>) -> RequestResult<Map<String, Value>> {
        let mut overrides = overrides.clone();
        let payment = match overrides.remove("payment") {
            None | Some(Value::Null) => 0,
            Some(value) => minor_units(&value).ok_or_else(|| {
                RequestError::invalid_override("payment", format!("expected an integer, got {value}"))
            })?,
        };

        let mut services = self.loading.services.clone();
        services.extend(overrides);

        let cd = services
            .entry("cd")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| RequestError::template("services.cd is not a mapping"))?;
        cd.insert("__content__".into(), Value::String(format_payment(payment)));
        Ok(services)
    }

    /// Builds the system section.
    pub fn system(&self, overrides: &Map<String, Value>) -> RequestResult<Map<String, Value>> {
        let mut system = self.system.clone();
        system.extend(overrides.clone());
        Ok(system)
    }

    /// Builds one loading.
    pub fn loading(
        &self,
        address: &Map<String, Value>,
        shipment: &Map<String, Value>,
        services: &Map<String, Value>,
    ) -> RequestResult<Loading> {
        let loading = Loading {
            receiver: self.receiver(address)?,
            shipment: self.shipment(shipment)?,
            services: self.services(services)?,
        };
        tracing::debug!(?loading, "built loading");
        Ok(loading)
    }

    /// Builds one loading per position, zipping the three sequences.
    ///
    /// Without `services` every loading gets the template services with
    /// no payment. The shortest sequence bounds the result.
    pub fn loadings(
        &self,
        addresses: &[Map<String, Value>],
        shipments: &[Map<String, Value>],
        services: Option<&[Map<String, Value>]>,
    ) -> RequestResult<Vec<Loading>> {
        let no_services = Map::new();
        let count = addresses
            .len()
            .min(shipments.len())
            .min(services.map_or(usize::MAX, <[_]>::len));

        (0..count)
            .map(|i| {
                let services = services.map_or(&no_services, |services| &services[i]);
                self.loading(&addresses[i], &shipments[i], services)
            })
            .collect()
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("loading", &self.loading)
            .field("system", &self.system)
            .finish_non_exhaustive()
    }
}

fn minor_units(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
