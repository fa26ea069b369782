//! Relation resolution by business key.

use crate::entity::{Entity, Link, Stored};
use crate::error::{CoreError, CoreResult};
use crate::model::{City, Country, Office, Quarter, Region, Street, Zone};
use crate::store::{Repository, Store};

impl<E: Entity> Link<E> {
    /// Points a business key at the row persisted under it.
    ///
    /// Fails with [`CoreError::ReferenceNotFound`] when nothing is stored
    /// under the key. Already resolved links are returned unchanged.
    pub fn resolve<R>(self, repository: &R) -> CoreResult<Self>
    where
        R: Repository<E> + ?Sized,
    {
        match self {
            Link::Key(key) => match repository.find(&key)? {
                Some(stored) => Ok(Link::to(&stored)),
                None => Err(CoreError::reference_not_found(E::KIND, key)),
            },
            resolved => Ok(resolved),
        }
    }

    /// Reads the referenced entity as currently persisted.
    ///
    /// Resolved links read their row; unresolved ones look up the key.
    pub fn load<R>(&self, repository: &R) -> CoreResult<Option<Stored<E>>>
    where
        R: Repository<E> + ?Sized,
    {
        match self {
            Link::Key(key) => repository.find(key),
            Link::Row { id, .. } => repository.get(*id),
        }
    }
}

/// An entity whose references can be resolved against a store.
pub trait Resolve: Entity {
    /// Resolves every reference, failing on the first one that is missing.
    fn resolve<S: Store + ?Sized>(self, store: &S) -> CoreResult<Self>;
}

/// Resolves every reference held by `record`.
pub fn resolve<E: Resolve, S: Store + ?Sized>(record: E, store: &S) -> CoreResult<E> {
    record.resolve(store)
}

impl Resolve for Zone {
    fn resolve<S: Store + ?Sized>(self, _store: &S) -> CoreResult<Self> {
        Ok(self)
    }
}

impl Resolve for Office {
    fn resolve<S: Store + ?Sized>(self, _store: &S) -> CoreResult<Self> {
        Ok(self)
    }
}

impl Resolve for Country {
    fn resolve<S: Store + ?Sized>(mut self, store: &S) -> CoreResult<Self> {
        self.zone = self.zone.resolve(store)?;
        Ok(self)
    }
}

impl Resolve for City {
    fn resolve<S: Store + ?Sized>(mut self, store: &S) -> CoreResult<Self> {
        self.zone = self.zone.resolve(store)?;
        Ok(self)
    }
}

impl Resolve for Quarter {
    fn resolve<S: Store + ?Sized>(mut self, store: &S) -> CoreResult<Self> {
        self.city = self.city.resolve(store)?;
        Ok(self)
    }
}

impl Resolve for Street {
    fn resolve<S: Store + ?Sized>(mut self, store: &S) -> CoreResult<Self> {
        self.city = self.city.resolve(store)?;
        Ok(self)
    }
}

impl Resolve for Region {
    fn resolve<S: Store + ?Sized>(mut self, store: &S) -> CoreResult<Self> {
        self.city = self.city.resolve(store)?;
        Ok(self)
    }
}
