//! Store-backed upsert of canonical entities.

use eecont_core::{CoreResult, Entity, Repository, RowId};
use std::sync::Arc;

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new row was created.
    Inserted(RowId),
    /// The row already stored under the business key was overwritten.
    Updated(RowId),
}

impl Upsert {
    /// Row id of the affected row.
    pub fn id(self) -> RowId {
        match self {
            Upsert::Inserted(id) | Upsert::Updated(id) => id,
        }
    }
}

/// Applies entities to a store by business key.
///
/// # Example
///
/// ```
/// use eecont_core::{MemoryStore, Zone};
/// use eecont_sync::{StoreApplier, Upsert};
/// use std::sync::Arc;
///
/// let applier = StoreApplier::new(Arc::new(MemoryStore::new()));
/// let zone = Zone {
///     eid: 1000,
///     is_ee: true,
///     name: "Зона".into(),
///     name_en: "Zone".into(),
///     national: true,
///     updated_time: eecont_core::transform::fallback_timestamp(),
/// };
///
/// assert!(matches!(applier.upsert(zone.clone()).unwrap(), Upsert::Inserted(_)));
/// assert!(matches!(applier.upsert(zone).unwrap(), Upsert::Updated(_)));
/// ```
#[derive(Debug)]
pub struct StoreApplier<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> StoreApplier<S> {
    /// Creates an applier writing to `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Gets the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Creates the entity if its business key is unknown, else overwrites
    /// every field of the stored row.
    pub fn upsert<E>(&self, entity: E) -> CoreResult<Upsert>
    where
        E: Entity,
        S: Repository<E>,
    {
        match self.store.find(&entity.key())? {
            Some(mut existing) => {
                existing.entity = entity;
                self.store.update(&existing)?;
                tracing::debug!("Update: {}", existing.entity);
                Ok(Upsert::Updated(existing.id))
            }
            None => {
                let stored = self.store.create(entity)?;
                tracing::debug!("Insert: {}", stored.entity);
                Ok(Upsert::Inserted(stored.id))
            }
        }
    }
}

impl<S: ?Sized> Clone for StoreApplier<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eecont_core::transform::fallback_timestamp;
    use eecont_core::{MemoryStore, Zone};

    fn zone(name: &str) -> Zone {
        Zone {
            eid: 1000,
            is_ee: false,
            name: name.into(),
            name_en: name.into(),
            national: true,
            updated_time: fallback_timestamp(),
        }
    }

    #[test]
    fn second_upsert_overwrites() {
        let store = Arc::new(MemoryStore::new());
        let applier = StoreApplier::new(Arc::clone(&store));

        let first = applier.upsert(zone("Първа")).unwrap();
        let second = applier.upsert(zone("Втора")).unwrap();

        assert_eq!(first, Upsert::Inserted(RowId(1)));
        assert_eq!(second, Upsert::Updated(RowId(1)));

        assert_eq!(Repository::<Zone>::count(&*store).unwrap(), 1);
        let stored = Repository::<Zone>::find(&*store, &1000).unwrap().unwrap();
        assert_eq!(stored.name, "Втора");
    }
}
