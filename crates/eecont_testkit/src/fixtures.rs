//! Raw provider records.
//!
//! The batches reference each other: every zone, city and country key
//! used by a later kind exists in an earlier one, so a full sync over
//! these fixtures resolves every reference.

use eecont_core::EntityKind;
use serde_json::{json, Value};

/// Zones 1000 and 2000.
pub fn zone_records() -> Value {
    json!([
        {"id": "1000", "is_ee": "1", "name": "Име1", "name_en": "Name1",
         "national": "1", "updated_time": "2013-02-18 12:13:14"},
        {"id": "2000", "is_ee": "0", "name": "Име2", "name_en": "Name2",
         "national": "0", "updated_time": "2000-02-29 23:24:25"}
    ])
}

/// Countries in zones 1000 and 2000.
pub fn country_records() -> Value {
    json!([
        {"country_name": "България", "country_name_en": "Bulgaria", "id_zone": "1000",
         "zone_name": "Име1", "zone_name_en": "Name1"},
        {"country_name": "Румъния", "country_name_en": "Romania", "id_zone": "2000",
         "zone_name": "Име2", "zone_name_en": "Name2"}
    ])
}

/// City 2000 in zone 1000 and village 3000 in zone 2000.
pub fn city_records() -> Value {
    json!([
        {
            "attach_offices": {
                "cargo_expres_shipments": {
                    "from_door": {"office_code": ["1000", "1001"]},
                    "from_office": {"office_code": ["1002", "1003"]},
                    "to_door": {"office_code": ["1004", "1005"]},
                    "to_office": {"office_code": ["1006", "1007"]}
                },
                "courier_shipments": {
                    "from_door": {"office_code": ["1016", "1017"]},
                    "to_door": {"office_code": ["1020", "1021"]}
                },
                "post_shipments": ""
            },
            "id": "2000", "id_country": "2001", "id_office": "2003", "id_zone": "1000",
            "name": "Град №1", "name_en": "City #1", "post_code": "2005",
            "region": "Планета Земя", "region_en": "Planet Earth",
            "service_days": {"day1": "1", "day2": "1", "day3": "1", "day4": "1",
                             "day5": "0", "day6": "0", "day7": "0"},
            "type": "гр.",
            "updated_time": "2012-10-03 09:07:09"
        },
        {
            "id": "3000", "id_country": "3001", "id_office": "3002", "id_zone": "2000",
            "name": "Село №2", "name_en": "Village #2", "post_code": "3004",
            "service_days": {"day1": "0", "day2": "0", "day3": "0", "day4": "0",
                             "day5": "1", "day6": "1", "day7": "1"},
            "type": "с.",
            "updated_time": "2009-09-09 23:59:59"
        }
    ])
}

/// Quarter 7 in city 2000.
pub fn quarter_records() -> Value {
    json!([
        {"id": "7", "name": "кв. Лозенец", "name_en": "Lozenets", "id_city": "2000",
         "updated_time": "2011-01-01 00:00:00"}
    ])
}

/// Streets in cities 2000 and 3000.
pub fn street_records() -> Value {
    json!([
        {"id": "1001", "name": "ул. Някоя си", "name_en": "Something Str.",
         "city_post_code": "2005", "id_city": "2000", "updated_time": "2000-10-20 10:20:30"},
        {"id": "2001", "name": "ул. Другая си", "name_en": "Something Else Str.",
         "city_post_code": "3004", "id_city": "3000", "updated_time": "2001-11-21 11:21:31"}
    ])
}

/// Region 1000 in city 2000.
pub fn region_records() -> Value {
    json!([
        {"id": "1000", "name": "Име на регион №1", "code": "1001", "id_city": "2000",
         "updated_time": "2010-9-15 7:15:30"}
    ])
}

/// Offices 648 and 177.
pub fn office_records() -> Value {
    json!([
        {
            "address": "Ямбол Ямбол ул. Дружба №1",
            "address_details": {"ap": "", "bl": "", "et": "", "num": "1", "other": "",
                                "quarter_name": "Ямбол", "street_name": "ул. Дружба", "vh": ""},
            "address_en": "Yambol Qmbol ul. Druzhba #1",
            "city_name": "Ямбол", "city_name_en": "Yambol",
            "id": "648",
            "latitude": "42.4821587", "longitude": "26.4996131",
            "name": "Ямбол Трите вятъра", "name_en": "Yambol Trite vjatara",
            "office_code": "8603",
            "phone": "+359 466 29962,+359 87 9922914",
            "time_priority": "09:30:00",
            "updated_time": "2013-03-24 01:00:13",
            "work_begin": "09:00:00", "work_begin_saturday": "09:00:00",
            "work_end": "18:00:00", "work_end_saturday": "13:00:00"
        },
        {
            "address": "Тутракан Тутракан ул. Силистра №51",
            "address_details": {"ap": "123", "bl": "234", "et": "345", "num": "51",
                                "other": "", "quarter_name": "Тутракан",
                                "street_name": "ул. Силистра", "vh": "456"},
            "address_en": "Tutrakan Tutrakan ul. Silistra #1",
            "city_name": "Тутракан", "city_name_en": "Tutrakan",
            "id": "177",
            "latitude": "44.04661273118875", "longitude": "26.624570750656133",
            "name": "Тутракан", "name_en": "Tutrakan",
            "office_code": "7600",
            "phone": "+359 866 61464,+359 87 9922602",
            "time_priority": "",
            "updated_time": "2013-03-10 13:26:00",
            "work_begin": "08:30", "work_begin_saturday": "",
            "work_end": "24:00", "work_end_saturday": ""
        }
    ])
}

/// The raw batch for `kind`.
pub fn records(kind: EntityKind) -> Value {
    match kind {
        EntityKind::Zone => zone_records(),
        EntityKind::Country => country_records(),
        EntityKind::City => city_records(),
        EntityKind::Quarter => quarter_records(),
        EntityKind::Street => street_records(),
        EntityKind::Region => region_records(),
        EntityKind::Office => office_records(),
    }
}

/// Number of records in the batch for `kind`.
pub fn record_count(kind: EntityKind) -> usize {
    records(kind).as_array().map_or(1, Vec::len)
}

/// A receiver override with a free-text address.
pub fn receiver() -> serde_json::Map<String, Value> {
    object(json!({
        "name": "Иван Петров",
        "phone_number": "+359 88 123 4567",
        "city": "София",
        "post_code": "1000",
        "address": "ул. Клокотница 7"
    }))
}

/// A shipment override.
pub fn shipment() -> serde_json::Map<String, Value> {
    object(json!({"description": "Книги", "weight": "2.5", "pack_count": 1}))
}

/// A services override collecting 10.50 on delivery.
pub fn services() -> serde_json::Map<String, Value> {
    object(json!({"payment": 1050}))
}

fn object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
