//! Property-based test generators using proptest.
//!
//! Strategies produce raw provider records that transform cleanly.

use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for seven Monday-first service-day flags.
pub fn weekday_flags_strategy() -> impl Strategy<Value = [bool; 7]> {
    prop::array::uniform7(any::<bool>())
}

/// Strategy for office-code lists.
pub fn office_codes_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..100_000, 0..8)
}

/// Strategy for provider timestamps, including malformed ones.
pub fn updated_time_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (2000i32..2030, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
            |(y, mo, d, h, mi, s)| format!("{y}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}")
        ),
        1 => Just("0000-00-00 00:00:00".to_string()),
        1 => Just(String::new()),
    ]
}

/// Strategy for one raw zone record with the given id range.
pub fn zone_record_strategy(ids: std::ops::Range<u32>) -> impl Strategy<Value = Value> {
    (
        ids,
        any::<bool>(),
        any::<bool>(),
        "[A-Za-zА-Яа-я ]{1,24}",
        updated_time_strategy(),
    )
        .prop_map(|(id, is_ee, national, name, updated_time)| {
            json!({
                "id": id.to_string(),
                "is_ee": if is_ee { "1" } else { "0" },
                "name": name,
                "name_en": name,
                "national": if national { "1" } else { "0" },
                "updated_time": updated_time,
            })
        })
}

/// Strategy for a batch of raw zone records. Ids may repeat.
pub fn zone_batch_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(zone_record_strategy(1..50), 0..30)
}
