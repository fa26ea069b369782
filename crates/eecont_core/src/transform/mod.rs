//! Normalization of raw provider records into canonical entities.
//!
//! Every kind has a pure transformer taking either one raw record or an
//! array of them. Only canonical fields survive; everything else the
//! provider sends is dropped. References to other entities come out as
//! [`Link::Key`] and are resolved separately.
//!
//! ```
//! use eecont_core::transform;
//! use serde_json::json;
//!
//! let zones = transform::zones(&json!({
//!     "id": "1000", "is_ee": "1", "name": "Име1", "name_en": "Name1",
//!     "national": "0", "updated_time": "2013-02-18 12:13:14", "extra": "x"
//! }))
//! .unwrap();
//! assert_eq!(zones[0].eid, 1000);
//! assert!(zones[0].is_ee);
//! assert!(!zones[0].national);
//! ```

mod fields;

pub use fields::{fallback_timestamp, parse_time, parse_updated_time};

use crate::entity::{Entity, Link};
use crate::error::CoreResult;
use crate::model::{
    AttachedOffices, City, Country, Office, Quarter, Region, Route, ShipmentClass, Street, Zone,
};
use chrono::NaiveTime;
use chrono_tz::Tz;
use fields::{
    address_details, attached_offices, flag, integer, object, required_text, service_days, text,
};
use serde_json::Value;

/// Default for office hours the provider leaves blank.
const MIDNIGHT: &str = "0:0";

/// Knobs for provider-specific conventions.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Civil timezone of naive provider timestamps.
    pub timezone: Tz,
    /// City `type` value that marks a village.
    pub village_marker: String,
}

impl TransformOptions {
    /// Sets the provider timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the village marker.
    pub fn with_village_marker(mut self, marker: impl Into<String>) -> Self {
        self.village_marker = marker.into();
        self
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Sofia,
            village_marker: "с.".to_string(),
        }
    }
}

/// Splits a raw batch into records. A single record is a batch of one.
pub fn records(data: &Value) -> Vec<&Value> {
    match data {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    }
}

/// An entity that can be built from one raw provider record.
pub trait Transform: Entity {
    /// Builds the canonical entity from `record`.
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self>;
}

/// Applies [`TransformOptions`] to raw records.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    /// Creates a transformer with the given options.
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transforms one record.
    pub fn one<E: Transform>(&self, record: &Value) -> CoreResult<E> {
        E::transform(self, record)
    }

    /// Transforms a record or an array of records, failing on the first
    /// bad record.
    pub fn batch<E: Transform>(&self, data: &Value) -> CoreResult<Vec<E>> {
        records(data)
            .into_iter()
            .map(|record| self.one(record))
            .collect()
    }
}

impl Transform for Zone {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;
        Ok(Zone {
            eid: integer(raw, "id")?,
            is_ee: flag(raw, "is_ee"),
            name: text(raw, "name")?,
            name_en: text(raw, "name_en")?,
            national: flag(raw, "national"),
            updated_time: parse_updated_time(raw.get("updated_time"), transformer.options.timezone),
        })
    }
}

impl Transform for Country {
    fn transform(_transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;
        Ok(Country {
            name: required_text(raw, "country_name")?,
            name_en: text(raw, "country_name_en")?,
            zone: Link::Key(integer(raw, "id_zone")?),
        })
    }
}

impl Transform for City {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;

        let mut offices = AttachedOffices::default();
        for class in ShipmentClass::ALL {
            for route in Route::ALL {
                offices.set(class, route, attached_offices(raw, class.tag(), route.tag())?);
            }
        }

        Ok(City {
            eid: integer(raw, "id")?,
            zone: Link::Key(integer(raw, "id_zone")?),
            name: text(raw, "name")?,
            name_en: text(raw, "name_en")?,
            post_code: integer(raw, "post_code")?,
            service_days: service_days(raw.get("service_days"))?,
            is_village: text(raw, "type")? == transformer.options.village_marker,
            updated_time: parse_updated_time(raw.get("updated_time"), transformer.options.timezone),
            offices,
        })
    }
}

/// Fields shared by quarters and streets.
struct CityPart {
    eid: u32,
    name: String,
    name_en: String,
    city: Link<City>,
    updated_time: chrono::DateTime<chrono::FixedOffset>,
}

impl CityPart {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;
        Ok(CityPart {
            eid: integer(raw, "id")?,
            name: text(raw, "name")?,
            name_en: text(raw, "name_en")?,
            city: Link::Key(integer(raw, "id_city")?),
            updated_time: parse_updated_time(raw.get("updated_time"), transformer.options.timezone),
        })
    }
}

impl Transform for Quarter {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let part = CityPart::transform(transformer, record)?;
        Ok(Quarter {
            eid: part.eid,
            name: part.name,
            name_en: part.name_en,
            city: part.city,
            updated_time: part.updated_time,
        })
    }
}

impl Transform for Street {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let part = CityPart::transform(transformer, record)?;
        Ok(Street {
            eid: part.eid,
            name: part.name,
            name_en: part.name_en,
            city: part.city,
            updated_time: part.updated_time,
        })
    }
}

impl Transform for Region {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;
        Ok(Region {
            eid: integer(raw, "id")?,
            name: text(raw, "name")?,
            code: integer(raw, "code")?,
            city: Link::Key(integer(raw, "id_city")?),
            updated_time: parse_updated_time(raw.get("updated_time"), transformer.options.timezone),
        })
    }
}

impl Transform for Office {
    fn transform(transformer: &Transformer, record: &Value) -> CoreResult<Self> {
        let raw = object(record)?;
        let address = address_details(raw)?;
        let hour = |field: &str| -> CoreResult<NaiveTime> {
            Ok(parse_time(raw.get(field), Some(MIDNIGHT))?.unwrap_or_default())
        };

        Ok(Office {
            eid: integer(raw, "id")?,
            name: text(raw, "name")?,
            name_en: text(raw, "name_en")?,
            office_code: integer(raw, "office_code")?,
            phone: text(raw, "phone")?,
            time_priority: hour("time_priority")?,
            latitude: text(raw, "latitude")?,
            longitude: text(raw, "longitude")?,
            work_begin: hour("work_begin")?,
            work_end: hour("work_end")?,
            work_begin_saturday: hour("work_begin_saturday")?,
            work_end_saturday: hour("work_end_saturday")?,
            updated_time: parse_updated_time(raw.get("updated_time"), transformer.options.timezone),
            address: text(raw, "address")?,
            address_en: text(raw, "address_en")?,
            city_name: text(raw, "city_name")?,
            city_name_en: text(raw, "city_name_en")?,
            quarter_name: address.quarter_name,
            street_name: address.street_name,
            number: address.number,
            apartment_building: address.apartment_building,
            entrance: address.entrance,
            floor: address.floor,
            apartment: address.apartment,
            other: address.other,
        })
    }
}

/// Transforms raw zone records.
pub fn zones(data: &Value) -> CoreResult<Vec<Zone>> {
    Transformer::default().batch(data)
}

/// Transforms raw country records.
pub fn countries(data: &Value) -> CoreResult<Vec<Country>> {
    Transformer::default().batch(data)
}

/// Transforms raw city records.
pub fn cities(data: &Value) -> CoreResult<Vec<City>> {
    Transformer::default().batch(data)
}

/// Transforms raw quarter records.
pub fn quarters(data: &Value) -> CoreResult<Vec<Quarter>> {
    Transformer::default().batch(data)
}

/// Transforms raw street records.
pub fn streets(data: &Value) -> CoreResult<Vec<Street>> {
    Transformer::default().batch(data)
}

/// Transforms raw region records.
pub fn regions(data: &Value) -> CoreResult<Vec<Region>> {
    Transformer::default().batch(data)
}

/// Transforms raw office records.
pub fn offices(data: &Value) -> CoreResult<Vec<Office>> {
    Transformer::default().batch(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_record_is_a_batch_of_one() {
        let record = json!({"id": "1"});
        assert_eq!(records(&record).len(), 1);
        assert_eq!(records(&json!([record.clone(), record])).len(), 2);
        assert!(records(&json!([])).is_empty());
    }

    #[test]
    fn non_record_is_rejected() {
        assert!(zones(&json!("zone")).is_err());
        assert!(zones(&json!([{"id": "1", "updated_time": ""}, 42])).is_err());
    }

    #[test]
    fn village_marker_is_configurable() {
        let record = json!({
            "id": "1", "id_zone": "2", "name": "Village", "name_en": "Village",
            "post_code": "1000", "type": "v.",
            "service_days": {"day1": "1"}, "updated_time": "2012-10-03 09:07:09"
        });
        let transformer = Transformer::new(TransformOptions::default().with_village_marker("v."));
        let city: City = transformer.one(&record).unwrap();
        assert!(city.is_village);

        let city: City = Transformer::default().one(&record).unwrap();
        assert!(!city.is_village);
    }
}
