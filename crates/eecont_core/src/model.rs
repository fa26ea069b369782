//! Canonical reference-data entities.

use crate::entity::{Entity, Link};
use crate::kind::EntityKind;
use chrono::{DateTime, FixedOffset, NaiveTime};
use eecont_codec::{OfficeList, WeekDays, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic delivery zone. Zones reference nothing and sync first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider id.
    pub eid: u32,
    /// Served by the provider itself rather than a subcontractor.
    pub is_ee: bool,
    /// Name.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// Domestic (true) or international zone.
    pub national: bool,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
}

impl Entity for Zone {
    type Key = u32;
    const KIND: EntityKind = EntityKind::Zone;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone: {}", self.name)
    }
}

/// A country. The provider issues no id for countries, so the name is the
/// business key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Name, unique.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// Delivery zone.
    pub zone: Link<Zone>,
}

impl Entity for Country {
    type Key = String;
    const KIND: EntityKind = EntityKind::Country;

    fn key(&self) -> String {
        self.name.clone()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Country: {}", self.name)
    }
}

/// Shipment classes with their own office attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipmentClass {
    /// Cargo express shipments.
    CargoExpress,
    /// Cargo palette shipments.
    CargoPalette,
    /// Courier shipments.
    Courier,
    /// Post shipments.
    Post,
}

impl ShipmentClass {
    /// All classes.
    pub const ALL: [ShipmentClass; 4] = [
        ShipmentClass::CargoExpress,
        ShipmentClass::CargoPalette,
        ShipmentClass::Courier,
        ShipmentClass::Post,
    ];

    /// Provider tag under `attach_offices`.
    pub fn tag(self) -> &'static str {
        match self {
            ShipmentClass::CargoExpress => "cargo_expres_shipments",
            ShipmentClass::CargoPalette => "cargo_palet_shipments",
            ShipmentClass::Courier => "courier_shipments",
            ShipmentClass::Post => "post_shipments",
        }
    }

    /// Short prefix used in canonical field names (`ces_from_door`).
    pub fn prefix(self) -> &'static str {
        match self {
            ShipmentClass::CargoExpress => "ces",
            ShipmentClass::CargoPalette => "cps",
            ShipmentClass::Courier => "cs",
            ShipmentClass::Post => "ps",
        }
    }
}

/// Direction and channel of an office attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sent from the customer's door.
    FromDoor,
    /// Delivered to the customer's door.
    ToDoor,
    /// Sent from an office.
    FromOffice,
    /// Delivered to an office.
    ToOffice,
}

impl Route {
    /// All routes.
    pub const ALL: [Route; 4] = [Route::FromDoor, Route::ToDoor, Route::FromOffice, Route::ToOffice];

    /// Provider tag under a shipment class.
    pub fn tag(self) -> &'static str {
        match self {
            Route::FromDoor => "from_door",
            Route::ToDoor => "to_door",
            Route::FromOffice => "from_office",
            Route::ToOffice => "to_office",
        }
    }
}

/// Office codes for the four routes of one shipment class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfficeRoutes {
    /// Offices serving pick-up from the door.
    pub from_door: OfficeList,
    /// Offices serving delivery to the door.
    pub to_door: OfficeList,
    /// Offices accepting shipments at the counter.
    pub from_office: OfficeList,
    /// Offices handing shipments out at the counter.
    pub to_office: OfficeList,
}

impl OfficeRoutes {
    /// Returns the list for `route`.
    pub fn get(&self, route: Route) -> &OfficeList {
        match route {
            Route::FromDoor => &self.from_door,
            Route::ToDoor => &self.to_door,
            Route::FromOffice => &self.from_office,
            Route::ToOffice => &self.to_office,
        }
    }

    fn get_mut(&mut self, route: Route) -> &mut OfficeList {
        match route {
            Route::FromDoor => &mut self.from_door,
            Route::ToDoor => &mut self.to_door,
            Route::FromOffice => &mut self.from_office,
            Route::ToOffice => &mut self.to_office,
        }
    }
}

/// Offices attached to a city, for every shipment class and route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttachedOffices {
    /// Cargo express shipments.
    pub cargo_express: OfficeRoutes,
    /// Cargo palette shipments.
    pub cargo_palette: OfficeRoutes,
    /// Courier shipments.
    pub courier: OfficeRoutes,
    /// Post shipments.
    pub post: OfficeRoutes,
}

impl AttachedOffices {
    /// Returns the routes of `class`.
    pub fn class(&self, class: ShipmentClass) -> &OfficeRoutes {
        match class {
            ShipmentClass::CargoExpress => &self.cargo_express,
            ShipmentClass::CargoPalette => &self.cargo_palette,
            ShipmentClass::Courier => &self.courier,
            ShipmentClass::Post => &self.post,
        }
    }

    /// Returns the office list for `class` and `route`.
    pub fn get(&self, class: ShipmentClass, route: Route) -> &OfficeList {
        self.class(class).get(route)
    }

    /// Replaces the office list for `class` and `route`.
    pub fn set(&mut self, class: ShipmentClass, route: Route, offices: OfficeList) {
        let routes = match class {
            ShipmentClass::CargoExpress => &mut self.cargo_express,
            ShipmentClass::CargoPalette => &mut self.cargo_palette,
            ShipmentClass::Courier => &mut self.courier,
            ShipmentClass::Post => &mut self.post,
        };
        *routes.get_mut(route) = offices;
    }
}

/// A city or village.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Provider id.
    pub eid: u32,
    /// Delivery zone.
    pub zone: Link<Zone>,
    /// Name.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// Postal code.
    pub post_code: u32,
    /// Days the provider serves the city, Monday-first.
    pub service_days: WeekDays,
    /// Village rather than town.
    pub is_village: bool,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
    /// Offices serving the city.
    pub offices: AttachedOffices,
}

impl City {
    /// Returns true if the provider serves the city on `day`.
    pub fn serves_on(&self, day: Weekday) -> bool {
        self.service_days.serves(day)
    }
}

impl Entity for City {
    type Key = u32;
    const KIND: EntityKind = EntityKind::City;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City: {}", self.name)
    }
}

/// A city quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quarter {
    /// Provider id.
    pub eid: u32,
    /// Name.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// City the quarter belongs to.
    pub city: Link<City>,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
}

/// A city street. Same shape as [`Quarter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    /// Provider id.
    pub eid: u32,
    /// Name.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// City the street belongs to.
    pub city: Link<City>,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
}

impl Entity for Quarter {
    type Key = u32;
    const KIND: EntityKind = EntityKind::Quarter;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Entity for Street {
    type Key = u32;
    const KIND: EntityKind = EntityKind::Street;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A city region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Provider id.
    pub eid: u32,
    /// Name.
    pub name: String,
    /// Region code.
    pub code: u32,
    /// City the region belongs to.
    pub city: Link<City>,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
}

impl Entity for Region {
    type Key = u32;
    const KIND: EntityKind = EntityKind::Region;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A provider service office.
///
/// The provider reuses office ids across categories, so `eid` is only
/// unique within one sync batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    /// Provider id.
    pub eid: u32,
    /// Name.
    pub name: String,
    /// Transliterated name.
    pub name_en: String,
    /// Office code used in shipment requests.
    pub office_code: u32,
    /// Phone numbers, comma separated as the provider sends them.
    pub phone: String,
    /// Earliest priority delivery hour.
    pub time_priority: NaiveTime,
    /// Latitude, verbatim.
    pub latitude: String,
    /// Longitude, verbatim.
    pub longitude: String,
    /// Opening hour on weekdays.
    pub work_begin: NaiveTime,
    /// Closing hour on weekdays.
    pub work_end: NaiveTime,
    /// Opening hour on Saturday.
    pub work_begin_saturday: NaiveTime,
    /// Closing hour on Saturday.
    pub work_end_saturday: NaiveTime,
    /// Last edit on the provider side.
    pub updated_time: DateTime<FixedOffset>,
    /// Full address.
    pub address: String,
    /// Transliterated full address.
    pub address_en: String,
    /// City name.
    pub city_name: String,
    /// Transliterated city name.
    pub city_name_en: String,
    /// Quarter name.
    pub quarter_name: String,
    /// Street name.
    pub street_name: String,
    /// Street number.
    pub number: String,
    /// Apartment building (`bl`).
    pub apartment_building: String,
    /// Entrance (`vh`).
    pub entrance: String,
    /// Floor (`et`).
    pub floor: String,
    /// Apartment (`ap`).
    pub apartment: String,
    /// Free-text remainder of the address.
    pub other: String,
}

impl Entity for Office {
    type Key = u32;
    const KIND: EntityKind = EntityKind::Office;

    fn key(&self) -> u32 {
        self.eid
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
