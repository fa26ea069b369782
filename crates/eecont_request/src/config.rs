//! Provider account settings and request templates.

use crate::error::RequestResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

/// A JSON object used as a request template section.
pub type Template = Map<String, Value>;

/// Provider account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    /// Shipment submission endpoint.
    pub parcel_url: String,
    /// Reference-data endpoint.
    pub service_url: String,
    /// Account user name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Default for Login {
    fn default() -> Self {
        Self {
            parcel_url: "https://demo.econt.com/e-econt/xml_parcel_import2.php".into(),
            service_url: "https://demo.econt.com/e-econt/xml_service_tool.php".into(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Templates for the sections of one loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingTemplate {
    /// Receiver section.
    pub receiver: Template,
    /// Shipment section.
    pub shipment: Template,
    /// Services section.
    pub services: Template,
}

impl Default for LoadingTemplate {
    fn default() -> Self {
        Self {
            receiver: object(json!({
                "city": "",
                "post_code": "",
                "name": "",
                "name_person": "",
                "phone_num": "",
            })),
            shipment: object(json!({
                "shipment_type": "PACK",
                "description": "",
                "pack_count": 1,
                "weight": "1",
                "tariff_sub_code": "OFFICE_DOOR",
            })),
            services: object(json!({
                "cd": {"type": "GET", "__content__": "0.0"},
            })),
        }
    }
}

/// Fallbacks for quotes the provider answers without cost or date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Delivery cost in minor currency units.
    pub delivery_cost: Option<i64>,
    /// Delivery date as the provider formats it.
    pub delivery_date: Option<String>,
}

/// Account settings and request templates.
///
/// Every section is optional in a settings file; missing sections take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EecontConfig {
    /// Provider account.
    pub login: Login,
    /// Loading section templates.
    pub loading: LoadingTemplate,
    /// System section template.
    pub system: Template,
    /// Quote fallbacks.
    pub defaults: Defaults,
}

impl Default for EecontConfig {
    fn default() -> Self {
        Self {
            login: Login::default(),
            loading: LoadingTemplate::default(),
            system: object(json!({
                "response_type": "XML",
                "only_calculate": 1,
                "validate": 0,
            })),
            defaults: Defaults::default(),
        }
    }
}

impl EecontConfig {
    /// Parses settings from JSON text.
    pub fn from_json_str(text: &str) -> RequestResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads settings from a JSON file.
    pub fn from_path(path: &Path) -> RequestResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Sets the quote fallbacks.
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }
}

fn object(value: Value) -> Template {
    match value {
        Value::Object(map) => map,
        _ => Template::new(),
    }
}
