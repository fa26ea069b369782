//! Entity kinds and their dependency order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of reference data kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Geographic delivery zone.
    Zone,
    /// Country, keyed by name.
    Country,
    /// City or village.
    City,
    /// City quarter.
    Quarter,
    /// City street.
    Street,
    /// City region.
    Region,
    /// Provider service office.
    Office,
}

impl EntityKind {
    /// Every kind, referenced kinds before the kinds that reference them.
    pub const DEPENDENCY_ORDER: [EntityKind; 7] = [
        EntityKind::Zone,
        EntityKind::Country,
        EntityKind::City,
        EntityKind::Quarter,
        EntityKind::Street,
        EntityKind::Region,
        EntityKind::Office,
    ];

    /// Kinds synced when no allow-list is given. Regions are opt-in.
    pub const DEFAULT_SYNC: [EntityKind; 6] = [
        EntityKind::Zone,
        EntityKind::Country,
        EntityKind::City,
        EntityKind::Quarter,
        EntityKind::Street,
        EntityKind::Office,
    ];

    /// Lower-case name, as used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Zone => "zone",
            EntityKind::Country => "country",
            EntityKind::City => "city",
            EntityKind::Quarter => "quarter",
            EntityKind::Street => "street",
            EntityKind::Region => "region",
            EntityKind::Office => "office",
        }
    }

    /// Sorts and deduplicates `kinds` into dependency order.
    pub fn in_dependency_order(kinds: impl IntoIterator<Item = EntityKind>) -> Vec<EntityKind> {
        let mut kinds: Vec<_> = kinds.into_iter().collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EntityKind::DEPENDENCY_ORDER
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
