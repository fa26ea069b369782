//! Entity trait, stored rows and business-key links.

use crate::kind::EntityKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

/// A canonical reference-data entity.
///
/// Every entity is identified by a business key issued by the provider.
/// The key is stable across syncs and independent of the [`RowId`] a store
/// assigns.
pub trait Entity:
    Clone + fmt::Debug + fmt::Display + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The business key type.
    type Key: Clone
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync;

    /// The kind of this entity.
    const KIND: EntityKind;

    /// Returns the business key.
    fn key(&self) -> Self::Key;
}

/// Storage-assigned surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity as persisted, with its surrogate row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Stored<E: Entity> {
    /// Surrogate row id.
    pub id: RowId,
    /// The persisted entity.
    pub entity: E,
}

impl<E: Entity> Stored<E> {
    /// Pairs an entity with its row id.
    pub fn new(id: RowId, entity: E) -> Self {
        Self { id, entity }
    }
}

impl<E: Entity> Deref for Stored<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.entity
    }
}

impl<E: Entity> fmt::Display for Stored<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.entity, f)
    }
}

/// A reference from one entity to another.
///
/// Transformers emit [`Link::Key`] holding the referenced business key;
/// the relation resolver turns it into [`Link::Row`] once the referenced
/// entity is known to be persisted. A link never holds a copy of the
/// referenced entity: [`Link::load`] reads it from the store, so later
/// syncs of the referenced kind are always visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum Link<E: Entity> {
    /// Business key of the referenced entity, not yet looked up.
    Key(E::Key),
    /// Row of the referenced entity, with its business key at resolve time.
    Row {
        /// Surrogate row id of the referenced entity.
        id: RowId,
        /// Business key of the referenced entity.
        key: E::Key,
    },
}

impl<E: Entity> Link<E> {
    /// Links to a persisted entity.
    pub fn to(stored: &Stored<E>) -> Self {
        Link::Row {
            id: stored.id,
            key: stored.entity.key(),
        }
    }

    /// Returns the business key of the referenced entity.
    pub fn key(&self) -> E::Key {
        match self {
            Link::Key(key) | Link::Row { key, .. } => key.clone(),
        }
    }

    /// Returns the row id if the link has been resolved.
    pub fn row_id(&self) -> Option<RowId> {
        match self {
            Link::Key(_) => None,
            Link::Row { id, .. } => Some(*id),
        }
    }

    /// Returns true if the link points at a stored row.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Link::Row { .. })
    }
}
