//! Field-level coercions shared by the transformers.

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use eecont_codec::{FieldCodec, OfficeList, WeekDays};
use serde_json::{Map, Value};
use std::str::FromStr;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Returns the raw object behind `value`.
pub(crate) fn object(value: &Value) -> CoreResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CoreError::validation(format!("expected a record, got {value}")))
}

/// Text field. Absent and null fields read as empty.
pub(crate) fn text(record: &Map<String, Value>, field: &str) -> CoreResult<String> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(CoreError::validation(format!(
            "field {field:?} should be text, got {other}"
        ))),
    }
}

/// Text field that must be present.
pub(crate) fn required_text(record: &Map<String, Value>, field: &str) -> CoreResult<String> {
    match record.get(field) {
        None | Some(Value::Null) => Err(CoreError::missing_field(field)),
        Some(_) => text(record, field),
    }
}

/// Integer field, accepting numeric strings.
pub(crate) fn integer<T>(record: &Map<String, Value>, field: &str) -> CoreResult<T>
where
    T: FromStr + TryFrom<u64>,
{
    let value = record
        .get(field)
        .ok_or_else(|| CoreError::missing_field(field))?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<T>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| CoreError::coercion(field, value))
}

/// Provider flag: `"1"` is true, anything else false.
pub(crate) fn flag(record: &Map<String, Value>, field: &str) -> bool {
    matches!(record.get(field), Some(Value::String(s)) if s == "1")
}

/// Sentinel for timestamps the provider sends malformed.
pub fn fallback_timestamp() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::<FixedOffset>::from(Utc.from_utc_datetime(&naive)))
        .unwrap_or_default()
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// Naive values are localized to `tz`. Unparsable values, and local times
/// skipped by a DST transition, fall back to [`fallback_timestamp`].
/// Ambiguous local times take the earlier instant.
pub fn parse_updated_time(value: Option<&Value>, tz: Tz) -> DateTime<FixedOffset> {
    let Some(text) = value.and_then(Value::as_str).map(str::trim) else {
        tracing::debug!(?value, "updated_time missing, using fallback");
        return fallback_timestamp();
    };

    if let Ok(aware) = DateTime::parse_from_rfc3339(text) {
        return aware;
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok());

    match naive.and_then(|naive| tz.from_local_datetime(&naive).earliest()) {
        Some(local) => local.with_timezone(&local.offset().fix()),
        None => {
            tracing::debug!(value = text, "malformed updated_time, using fallback");
            fallback_timestamp()
        }
    }
}

/// Parses a time of day.
///
/// Empty input, or text not shaped like `H:M[:S[.f]]`, uses `default`
/// (parsed the same way) or yields `None`. The provider writes end of day as
/// `24:00`, which becomes 23:59. Shaped text with an out-of-range field, and
/// non-string values, are validation errors.
pub fn parse_time(value: Option<&Value>, default: Option<&str>) -> CoreResult<Option<NaiveTime>> {
    let text = match value {
        None | Some(Value::Null) => "",
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            tracing::error!(value = %other, "bad time string");
            return Err(CoreError::validation(format!("bad time string: {other}")));
        }
    };

    let text = if text.starts_with("24") { "23:59" } else { text };

    if !is_time_shaped(text) {
        if !text.is_empty() {
            tracing::debug!(value = text, "not a time of day, using default");
        }
        return match default {
            Some(default) => parse_time(Some(&Value::String(default.to_string())), None),
            None => Ok(None),
        };
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .map(Some)
        .ok_or_else(|| {
            tracing::error!(value = text, "bad time string");
            CoreError::validation(format!("bad time string: {text:?}"))
        })
}

/// `H:M` or `H:M:S`, one or two digits each, seconds optionally fractional.
fn is_time_shaped(text: &str) -> bool {
    fn short_digits(part: &str) -> bool {
        (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    }

    let parts: Vec<&str> = text.split(':').collect();
    match parts.as_slice() {
        [hour, minute] => short_digits(hour) && short_digits(minute),
        [hour, minute, second] => {
            let (whole, fraction) = match second.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (*second, None),
            };
            short_digits(hour)
                && short_digits(minute)
                && short_digits(whole)
                && fraction.is_none_or(|f| !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()))
        }
        _ => false,
    }
}

/// Office codes at `attach_offices.<class_tag>.<route_tag>.office_code`.
///
/// Any missing or oddly shaped step yields an empty list. Falls back to the
/// record itself when `attach_offices` is absent.
pub(crate) fn attached_offices(
    record: &Map<String, Value>,
    class_tag: &str,
    route_tag: &str,
) -> CoreResult<OfficeList> {
    let offices = match record.get("attach_offices") {
        Some(Value::Object(offices)) => offices,
        Some(_) => return Ok(OfficeList::default()),
        None => record,
    };

    let codes = offices
        .get(class_tag)
        .and_then(Value::as_object)
        .and_then(|routes| routes.get(route_tag))
        .and_then(Value::as_object)
        .and_then(|route| route.get("office_code"))
        .filter(|codes| codes.is_array());

    match codes {
        Some(codes) => Ok(OfficeList::decode(codes)?),
        None => Ok(OfficeList::default()),
    }
}

/// Service days from `{day1: "1", ..., day7: "0"}`.
///
/// A mask integer or string is decoded with the weekday codec.
pub(crate) fn service_days(value: Option<&Value>) -> CoreResult<WeekDays> {
    match value {
        Some(Value::Object(days)) => {
            let mut flags = [false; 7];
            for (index, slot) in flags.iter_mut().enumerate() {
                let field = format!("day{}", index + 1);
                *slot = flag(days, &field);
            }
            Ok(WeekDays::new(flags))
        }
        Some(other) => Ok(WeekDays::decode(other)?),
        None => Err(CoreError::missing_field("service_days")),
    }
}

/// Address components of an office.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct AddressDetails {
    pub other: String,
    pub quarter_name: String,
    pub street_name: String,
    pub apartment_building: String,
    pub entrance: String,
    pub floor: String,
    pub apartment: String,
    pub number: String,
}

/// Reads address components from `address_details`, or from the record
/// itself when the substructure is absent.
pub(crate) fn address_details(record: &Map<String, Value>) -> CoreResult<AddressDetails> {
    let details = match record.get("address_details") {
        Some(Value::Object(details)) => details,
        _ => record,
    };

    Ok(AddressDetails {
        other: text(details, "other")?,
        quarter_name: text(details, "quarter_name")?,
        street_name: text(details, "street_name")?,
        apartment_building: text(details, "bl")?,
        entrance: text(details, "vh")?,
        floor: text(details, "et")?,
        apartment: text(details, "ap")?,
        number: text(details, "num")?,
    })
}
