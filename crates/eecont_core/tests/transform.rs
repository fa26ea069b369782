//! Transformer fixtures for every entity kind.

use chrono::{DateTime, FixedOffset, NaiveTime, Offset, TimeZone};
use chrono_tz::Europe::Sofia;
use eecont_core::transform;
use eecont_core::{
    AttachedOffices, City, CoreError, Country, Link, Office, OfficeList, OfficeRoutes, Region,
    Street, WeekDays, Weekday, Zone,
};
use serde_json::{json, Value};

fn sofia(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    let local = Sofia.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap();
    local.with_timezone(&local.offset().fix())
}

fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

fn codes(codes: &[u32]) -> OfficeList {
    OfficeList::new(codes.to_vec())
}

fn routes(from_door: &[u32], from_office: &[u32], to_door: &[u32], to_office: &[u32]) -> OfficeRoutes {
    OfficeRoutes {
        from_door: codes(from_door),
        to_door: codes(to_door),
        from_office: codes(from_office),
        to_office: codes(to_office),
    }
}

/// Adds keys the transformers must drop.
fn with_noise(mut record: Value) -> Value {
    let object = record.as_object_mut().unwrap();
    object.insert("something1".into(), json!("something else 1"));
    object.insert("something2".into(), json!("something else 2"));
    object.insert("something3".into(), json!("something else 3"));
    record
}

fn raw_cities() -> Value {
    json!([
        {
            "attach_offices": {
                "cargo_expres_shipments": {
                    "from_door": {"office_code": ["1000", "1001"]},
                    "from_office": {"office_code": ["1002", "1003"]},
                    "to_door": {"office_code": ["1004", "1005"]},
                    "to_office": {"office_code": ["1006", "1007"]}
                },
                "cargo_palet_shipments": {
                    "from_door": {"office_code": ["1008", "1009"]},
                    "from_office": {"office_code": ["1010", "1011"]},
                    "to_door": {"office_code": ["1012", "1013"]},
                    "to_office": {"office_code": ["1014", "1015"]}
                },
                "courier_shipments": {
                    "from_door": {"office_code": ["1016", "1017"]},
                    "from_office": {"office_code": ["1018", "1019"]},
                    "to_door": {"office_code": ["1020", "1021"]},
                    "to_office": {"office_code": ["1022", "1023"]}
                },
                "post_shipments": {
                    "from_door": {"office_code": ["1024", "1025"]},
                    "from_office": {"office_code": ["1026", "1027"]},
                    "to_door": {"office_code": ["1028", "1029"]},
                    "to_office": {"office_code": ["1030", "1031"]}
                }
            },
            "id": "2000", "id_country": "2001", "id_office": "2003", "id_zone": "2004",
            "name": "Град №1", "name_en": "City #1", "post_code": "2005",
            "region": "Планета Земя", "region_en": "Planet Earth",
            "service_days": {"day1": "1", "day2": "1", "day3": "1", "day4": "1",
                             "day5": "0", "day6": "0", "day7": "0"},
            "type": "гр.",
            "updated_time": "2012-10-03 09:07:09"
        },
        {
            "attach_offices": {
                "cargo_expres_shipments": {
                    "from_door": {"office_code": ""},
                    "from_office": "",
                    "to_door": {"office_code": ["2000", "2001"]},
                    "to_office": {"office_code": ["2002", "2003"]}
                },
                "courier_shipments": "",
                "post_shipments": {
                    "from_door": {"office_code": ["2020", "2021"]},
                    "to_door": {"office_code": []},
                    "to_office": {"office_code": ["2025", "2026", "2027"]}
                }
            },
            "id": "3000", "id_country": "3001", "id_office": "3002", "id_zone": "3003",
            "name": "Град №2", "name_en": "City #2", "post_code": "3004",
            "region": "Планета Земя", "region_en": "Planet Earth",
            "service_days": {"day1": "0", "day2": "0", "day3": "0", "day4": "0",
                             "day5": "1", "day6": "1", "day7": "1"},
            "type": "с.",
            "updated_time": "2009-09-09 23:59:59"
        }
    ])
}

fn expected_cities() -> Vec<City> {
    vec![
        City {
            eid: 2000,
            zone: Link::Key(2004),
            name: "Град №1".into(),
            name_en: "City #1".into(),
            post_code: 2005,
            service_days: WeekDays::new([true, true, true, true, false, false, false]),
            is_village: false,
            updated_time: sofia(2012, 10, 3, 9, 7, 9),
            offices: AttachedOffices {
                cargo_express: routes(&[1000, 1001], &[1002, 1003], &[1004, 1005], &[1006, 1007]),
                cargo_palette: routes(&[1008, 1009], &[1010, 1011], &[1012, 1013], &[1014, 1015]),
                courier: routes(&[1016, 1017], &[1018, 1019], &[1020, 1021], &[1022, 1023]),
                post: routes(&[1024, 1025], &[1026, 1027], &[1028, 1029], &[1030, 1031]),
            },
        },
        City {
            eid: 3000,
            zone: Link::Key(3003),
            name: "Град №2".into(),
            name_en: "City #2".into(),
            post_code: 3004,
            service_days: WeekDays::new([false, false, false, false, true, true, true]),
            is_village: true,
            updated_time: sofia(2009, 9, 9, 23, 59, 59),
            offices: AttachedOffices {
                cargo_express: routes(&[], &[], &[2000, 2001], &[2002, 2003]),
                cargo_palette: OfficeRoutes::default(),
                courier: OfficeRoutes::default(),
                post: routes(&[2020, 2021], &[], &[], &[2025, 2026, 2027]),
            },
        },
    ]
}

#[test]
fn cities_single_multiple_and_filtered() {
    let raw = raw_cities();
    let expected = expected_cities();

    assert_eq!(transform::cities(&raw).unwrap(), expected);
    assert_eq!(transform::cities(&raw[0]).unwrap(), vec![expected[0].clone()]);
    assert_eq!(
        transform::cities(&with_noise(raw[1].clone())).unwrap(),
        vec![expected[1].clone()]
    );
}

#[test]
fn city_service_days() {
    let cities = transform::cities(&raw_cities()).unwrap();
    assert!(cities[0].serves_on(Weekday::Monday));
    assert!(!cities[0].serves_on(Weekday::Sunday));
    assert!(cities[1].serves_on(Weekday::Sunday));
}

#[test]
fn cities_display() {
    let cities = transform::cities(&raw_cities()).unwrap();
    assert_eq!(cities[0].to_string(), "City: Град №1");
}

#[test]
fn countries() {
    let raw = json!([
        {"country_name": "Държава №1", "country_name_en": "Country #1", "id_zone": "1000",
         "zone_name": "Зона №1", "zone_name_en": "Zone #1"},
        {"country_name": "Държава №2", "country_name_en": "Country #2", "id_zone": "2000",
         "zone_name": "Зона №2", "zone_name_en": "Zone #2"}
    ]);
    let expected = vec![
        Country {
            name: "Държава №1".into(),
            name_en: "Country #1".into(),
            zone: Link::Key(1000),
        },
        Country {
            name: "Държава №2".into(),
            name_en: "Country #2".into(),
            zone: Link::Key(2000),
        },
    ];

    assert_eq!(transform::countries(&raw).unwrap(), expected);
    assert_eq!(
        transform::countries(&with_noise(raw[0].clone())).unwrap(),
        vec![expected[0].clone()]
    );
}

fn raw_offices() -> Value {
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
                                "other": "Пепеляшка е красива", "quarter_name": "Тутракан",
                                "street_name": "ул. Силистра", "vh": "456"},
            "address_en": "Tutrakan Tutrakan ul. Silistra #1",
            "city_name": "Тутракан", "city_name_en": "Tutrakan",
            "id": "177",
            "latitude": "44.04661273118875", "longitude": "26.624570750656133",
            "name": "Тутракан", "name_en": "Tutrakan",
            "office_code": "7600",
            "phone": "+359 866 61464,+359 87 9922602",
            "time_priority": "23:34:45",
            "updated_time": "2013-03-10 13:26:00",
            "work_begin": "12:23:34", "work_begin_saturday": "23:23:23",
            "work_end": "12:34:56", "work_end_saturday": "20:01:02"
        }
    ])
}

fn yambol() -> Office {
    Office {
        eid: 648,
        name: "Ямбол Трите вятъра".into(),
        name_en: "Yambol Trite vjatara".into(),
        office_code: 8603,
        phone: "+359 466 29962,+359 87 9922914".into(),
        time_priority: hms(9, 30, 0),
        latitude: "42.4821587".into(),
        longitude: "26.4996131".into(),
        work_begin: hms(9, 0, 0),
        work_end: hms(18, 0, 0),
        work_begin_saturday: hms(9, 0, 0),
        work_end_saturday: hms(13, 0, 0),
        updated_time: sofia(2013, 3, 24, 1, 0, 13),
        address: "Ямбол Ямбол ул. Дружба №1".into(),
        address_en: "Yambol Qmbol ul. Druzhba #1".into(),
        city_name: "Ямбол".into(),
        city_name_en: "Yambol".into(),
        quarter_name: "Ямбол".into(),
        street_name: "ул. Дружба".into(),
        number: "1".into(),
        apartment_building: String::new(),
        entrance: String::new(),
        floor: String::new(),
        apartment: String::new(),
        other: String::new(),
    }
}

fn tutrakan() -> Office {
    Office {
        eid: 177,
        name: "Тутракан".into(),
        name_en: "Tutrakan".into(),
        office_code: 7600,
        phone: "+359 866 61464,+359 87 9922602".into(),
        time_priority: hms(23, 34, 45),
        latitude: "44.04661273118875".into(),
        longitude: "26.624570750656133".into(),
        work_begin: hms(12, 23, 34),
        work_end: hms(12, 34, 56),
        work_begin_saturday: hms(23, 23, 23),
        work_end_saturday: hms(20, 1, 2),
        updated_time: sofia(2013, 3, 10, 13, 26, 0),
        address: "Тутракан Тутракан ул. Силистра №51".into(),
        address_en: "Tutrakan Tutrakan ul. Silistra #1".into(),
        city_name: "Тутракан".into(),
        city_name_en: "Tutrakan".into(),
        quarter_name: "Тутракан".into(),
        street_name: "ул. Силистра".into(),
        number: "51".into(),
        apartment_building: "234".into(),
        entrance: "456".into(),
        floor: "345".into(),
        apartment: "123".into(),
        other: "Пепеляшка е красива".into(),
    }
}

#[test]
fn offices() {
    let raw = raw_offices();
    assert_eq!(transform::offices(&raw).unwrap(), vec![yambol(), tutrakan()]);
    assert_eq!(
        transform::offices(&with_noise(raw[1].clone())).unwrap(),
        vec![tutrakan()]
    );
}

#[test]
fn office_hours_default_to_midnight() {
    let mut raw = raw_offices()[0].clone();
    for field in [
        "time_priority",
        "work_begin",
        "work_begin_saturday",
        "work_end",
        "work_end_saturday",
    ] {
        raw[field] = Value::Null;
    }

    let mut expected = yambol();
    expected.time_priority = NaiveTime::MIN;
    expected.work_begin = NaiveTime::MIN;
    expected.work_begin_saturday = NaiveTime::MIN;
    expected.work_end = NaiveTime::MIN;
    expected.work_end_saturday = NaiveTime::MIN;

    assert_eq!(transform::offices(&raw).unwrap(), vec![expected]);
}

#[test]
fn office_end_of_day() {
    let mut raw = raw_offices()[0].clone();
    raw["work_end"] = json!("24:00");
    let offices = transform::offices(&raw).unwrap();
    assert_eq!(offices[0].work_end, hms(23, 59, 0));
}

#[test]
fn office_unreadable_hours_default_to_midnight() {
    let mut raw = raw_offices()[0].clone();
    raw["work_begin"] = json!("at nine");
    raw["work_end_saturday"] = json!("closed");

    let offices = transform::offices(&raw).unwrap();
    assert_eq!(offices[0].work_begin, NaiveTime::MIN);
    assert_eq!(offices[0].work_end_saturday, NaiveTime::MIN);
    assert_eq!(offices[0].work_end, yambol().work_end);
}

#[test]
fn office_out_of_range_hours_fail() {
    for bad in ["25:00", "12:61"] {
        let mut raw = raw_offices()[0].clone();
        raw["work_begin"] = json!(bad);
        assert!(
            matches!(transform::offices(&raw), Err(CoreError::Validation { .. })),
            "{bad}"
        );
    }
}

#[test]
fn regions_with_unpadded_timestamps() {
    let raw = json!([
        {"id": "1000", "name": "Име на регион №1", "code": "1001", "id_city": "1002",
         "updated_time": "2010-9-15 7:15:30"},
        {"id": "2000", "name": "Име на регион №2", "code": "2001", "id_city": "2002",
         "updated_time": "2010-12-8 22:33:44"}
    ]);
    let expected = vec![
        Region {
            eid: 1000,
            name: "Име на регион №1".into(),
            code: 1001,
            city: Link::Key(1002),
            updated_time: sofia(2010, 9, 15, 7, 15, 30),
        },
        Region {
            eid: 2000,
            name: "Име на регион №2".into(),
            code: 2001,
            city: Link::Key(2002),
            updated_time: sofia(2010, 12, 8, 22, 33, 44),
        },
    ];

    assert_eq!(transform::regions(&raw).unwrap(), expected);
    assert_eq!(
        transform::regions(&with_noise(raw[0].clone())).unwrap(),
        vec![expected[0].clone()]
    );
}

#[test]
fn streets() {
    let raw = json!([
        {"id": "1001", "name": "ул. Някоя си", "name_en": "Something Str.",
         "city_post_code": "1002", "id_city": "1003", "updated_time": "2000-10-20 10:20:30"},
        {"id": "2001", "name": "ул. Другая си", "name_en": "Something Else Str.",
         "city_post_code": "2002", "id_city": "2003", "updated_time": "2001-11-21 11:21:31"}
    ]);
    let expected = vec![
        Street {
            eid: 1001,
            name: "ул. Някоя си".into(),
            name_en: "Something Str.".into(),
            city: Link::Key(1003),
            updated_time: sofia(2000, 10, 20, 10, 20, 30),
        },
        Street {
            eid: 2001,
            name: "ул. Другая си".into(),
            name_en: "Something Else Str.".into(),
            city: Link::Key(2003),
            updated_time: sofia(2001, 11, 21, 11, 21, 31),
        },
    ];

    assert_eq!(transform::streets(&raw).unwrap(), expected);
    assert_eq!(
        transform::streets(&with_noise(raw[1].clone())).unwrap(),
        vec![expected[1].clone()]
    );
}

#[test]
fn quarters_share_the_street_shape() {
    let raw = json!({"id": "7", "name": "кв. Лозенец", "name_en": "Lozenets",
                     "id_city": "41", "updated_time": "2011-01-01 00:00:00"});
    let quarters = transform::quarters(&raw).unwrap();
    assert_eq!(quarters.len(), 1);
    assert_eq!(quarters[0].eid, 7);
    assert_eq!(quarters[0].city, Link::Key(41));
    assert_eq!(quarters[0].to_string(), "кв. Лозенец");
}

fn raw_zones() -> Value {
    json!([
        {"id": "1000", "is_ee": "1", "name": "Име1", "name_en": "Name1",
         "national": "1", "updated_time": "2013-02-18 12:13:14"},
        {"id": "2000", "is_ee": "0", "name": "Име2", "name_en": "Name2",
         "national": "0", "updated_time": "2000-02-29 23:24:25"}
    ])
}

#[test]
fn zones() {
    let expected = vec![
        Zone {
            eid: 1000,
            is_ee: true,
            name: "Име1".into(),
            name_en: "Name1".into(),
            national: true,
            updated_time: sofia(2013, 2, 18, 12, 13, 14),
        },
        Zone {
            eid: 2000,
            is_ee: false,
            name: "Име2".into(),
            name_en: "Name2".into(),
            national: false,
            updated_time: sofia(2000, 2, 29, 23, 24, 25),
        },
    ];

    let raw = raw_zones();
    assert_eq!(transform::zones(&raw).unwrap(), expected);
    assert_eq!(
        transform::zones(&with_noise(raw[0].clone())).unwrap(),
        vec![expected[0].clone()]
    );
}

#[test]
fn zone_with_bad_id_fails() {
    let mut raw = raw_zones()[0].clone();
    raw["id"] = json!("bad");
    assert!(transform::zones(&raw).is_err());
}

#[test]
fn malformed_timestamp_uses_sentinel() {
    let mut raw = raw_zones()[0].clone();
    raw["updated_time"] = json!("0000-00-00 00:00:00");
    let zones = transform::zones(&raw).unwrap();
    assert_eq!(zones[0].updated_time, transform::fallback_timestamp());
}

#[test]
fn transformer_options_apply() {
    use eecont_core::{TransformOptions, Transformer};

    let options = TransformOptions::default()
        .with_village_marker("гр.")
        .with_timezone(chrono_tz::UTC);
    let transformer = Transformer::new(options);

    let cities: Vec<City> = transformer.batch(&raw_cities()).unwrap();
    assert!(cities[0].is_village);
    assert!(!cities[1].is_village);

    let zone: Zone = transformer.one(&raw_zones()[0]).unwrap();
    let expected = chrono::Utc
        .with_ymd_and_hms(2013, 2, 18, 12, 13, 14)
        .single()
        .map(|utc| utc.fixed_offset());
    assert_eq!(Some(zone.updated_time), expected);
}
