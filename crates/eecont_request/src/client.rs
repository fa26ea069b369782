//! Quote, address-validation and shipment operations.

use crate::address::AddressParser;
use crate::builder::{Loading, RequestBuilder, ShippingRequest};
use crate::config::{Defaults, EecontConfig};
use crate::error::RequestResult;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Submits shipping requests to the provider.
pub trait ShipmentTransport: Send + Sync {
    /// Submits `request` and returns the provider's raw response.
    fn submit(&self, request: &ShippingRequest) -> RequestResult<Value>;
}

/// Delivery cost and date for a prospective shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Cost in minor currency units.
    pub cost: Option<i64>,
    /// Delivery date as the provider formats it.
    pub date: Option<String>,
}

/// Looks up a nested value, `None` on any missing or non-mapping step.
///
/// ```
/// use eecont_request::dict_get;
/// use serde_json::json;
///
/// let response = json!({"result": {"e": {"error": "Невалиден адрес"}}});
/// assert_eq!(dict_get(&response, &["result", "e", "error"]), Some(&json!("Невалиден адрес")));
/// assert_eq!(dict_get(&response, &["result", "e", "error", "code"]), None);
/// ```
pub fn dict_get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |node, key| node.as_object()?.get(*key))
}

/// Client for the provider's shipping operations.
pub struct EecontClient<T: ShipmentTransport> {
    builder: RequestBuilder,
    transport: T,
    defaults: Defaults,
}

impl<T: ShipmentTransport> EecontClient<T> {
    /// Creates a client over `config`.
    pub fn new(config: &EecontConfig, transport: T, parser: Arc<dyn AddressParser>) -> Self {
        Self {
            builder: RequestBuilder::new(config, parser),
            transport,
            defaults: config.defaults.clone(),
        }
    }

    /// Gets the request builder.
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Gets the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits prepared loadings with `system` overrides.
    pub fn submit(
        &self,
        loadings: Vec<Loading>,
        system: &Map<String, Value>,
    ) -> RequestResult<Value> {
        let request = ShippingRequest {
            loadings,
            system: self.builder.system(system)?,
        };
        tracing::debug!(
            system = ?request.system,
            loadings = request.loadings.len(),
            "submitting request"
        );
        self.transport.submit(&request)
    }

    fn single(
        &self,
        address: &Map<String, Value>,
        shipment: &Map<String, Value>,
        services: &Map<String, Value>,
        system: Value,
    ) -> RequestResult<Value> {
        let loading = self.builder.loading(address, shipment, services)?;
        self.submit(vec![loading], &object(system))
    }

    /// Asks for the cost and delivery date of a shipment without creating it.
    ///
    /// Missing or unparsable values in the response fall back to the
    /// configured defaults. A zero total is a real cost and is kept.
    pub fn quote(
        &self,
        address: &Map<String, Value>,
        shipment: &Map<String, Value>,
        services: &Map<String, Value>,
    ) -> RequestResult<Quote> {
        let response = self.single(
            address,
            shipment,
            services,
            json!({"only_calculate": 1, "validate": 0}),
        )?;

        let cost = dict_get(&response, &["result", "e", "loading_price", "total"])
            .and_then(minor_units);
        let date = dict_get(&response, &["result", "e", "delivery_date"])
            .and_then(Value::as_str)
            .filter(|date| !date.is_empty())
            .map(str::to_string);

        if cost.is_none() || date.is_none() {
            tracing::warn!(?response, "quote incomplete, using defaults");
        }

        Ok(Quote {
            cost: cost.or(self.defaults.delivery_cost),
            date: date.or_else(|| self.defaults.delivery_date.clone()),
        })
    }

    /// Checks a receiver address with a dummy package.
    ///
    /// Returns `None` when the provider accepts the address, else its
    /// error text.
    pub fn validate_address(
        &self,
        address: &Map<String, Value>,
    ) -> RequestResult<Option<String>> {
        let shipment = object(json!({"description": "A dummy package", "weight": "1"}));
        let services = object(json!({"payment": 100}));
        let system = json!({"only_calculate": 1});
        let response = self.single(address, &shipment, &services, system)?;

        Ok(match dict_get(&response, &["result", "e", "error"]) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        })
    }

    /// Creates a shipment and returns the provider's raw response.
    pub fn request_shipment(
        &self,
        address: &Map<String, Value>,
        shipment: &Map<String, Value>,
        services: &Map<String, Value>,
    ) -> RequestResult<Value> {
        self.single(
            address,
            shipment,
            services,
            json!({"only_calculate": 0, "validate": 0}),
        )
    }
}

/// Decimal amount to minor units, rounding half away from zero.
fn minor_units(value: &Value) -> Option<i64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let minor = (amount * 100.0).round();
    // rejects NaN, infinities and out-of-range amounts
    (minor.is_finite() && minor.abs() < i64::MAX as f64).then_some(minor as i64)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
