//! Free-text address decomposition.

use serde_json::{Map, Value};

/// Components of a receiver address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Street or quarter name.
    pub street: String,
    /// Street number.
    pub num: String,
    /// Apartment block.
    pub block: String,
    /// Entrance.
    pub entrance: String,
    /// Floor.
    pub floor: String,
    /// Apartment.
    pub apartment: String,
    /// Anything the parser could not place.
    pub other: String,
}

impl ParsedAddress {
    /// Reads a structured address given in the provider's field names.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let get = |key: &str| match fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        Self {
            street: get("street"),
            num: get("num"),
            block: get("ab"),
            entrance: get("en"),
            floor: get("fl"),
            apartment: get("ap"),
            other: get("street_other"),
        }
    }

    /// Receiver fields for these components.
    pub fn into_receiver_fields(self) -> Map<String, Value> {
        [
            ("street", self.street),
            ("street_num", self.num),
            ("street_bl", self.block),
            ("street_vh", self.entrance),
            ("street_et", self.floor),
            ("street_ap", self.apartment),
            ("street_other", self.other),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect()
    }
}

/// Splits a free-text address into components.
pub trait AddressParser: Send + Sync {
    /// Parses `text`. Parsing never fails; unplaced text goes to `other`.
    fn parse(&self, text: &str) -> ParsedAddress;
}

/// Parser for callers without one: the whole text becomes the street.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAddressParser;

impl AddressParser for NoopAddressParser {
    fn parse(&self, text: &str) -> ParsedAddress {
        ParsedAddress {
            street: text.trim().to_string(),
            ..ParsedAddress::default()
        }
    }
}
