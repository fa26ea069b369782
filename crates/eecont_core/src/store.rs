//! Persistence capability and the in-memory store.
//!
//! Entities are looked up by business key and carry a storage-assigned
//! [`RowId`]. [`MemoryStore`] keeps one table per kind and can be written
//! to and read back from a CBOR snapshot file, so successive sync runs
//! update rows in place.

use crate::entity::{Entity, RowId, Stored};
use crate::error::{CoreError, CoreResult};
use crate::kind::EntityKind;
use crate::model::{City, Country, Office, Quarter, Region, Street, Zone};
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// Lookup and write access to the entities of one kind.
pub trait Repository<E: Entity> {
    /// Finds the entity stored under `key`.
    fn find(&self, key: &E::Key) -> CoreResult<Option<Stored<E>>>;

    /// Gets the entity stored in row `id`.
    fn get(&self, id: RowId) -> CoreResult<Option<Stored<E>>>;

    /// Persists a new entity and returns it with its row id.
    fn create(&self, entity: E) -> CoreResult<Stored<E>>;

    /// Overwrites the row `record.id` with `record.entity`.
    fn update(&self, record: &Stored<E>) -> CoreResult<()>;

    /// Returns every stored entity in insertion order.
    ///
    /// **Warning**: This is a full table scan.
    fn scan_all(&self) -> CoreResult<Vec<Stored<E>>>;

    /// Number of stored entities.
    fn count(&self) -> CoreResult<usize>;
}

/// A store holding every entity kind.
pub trait Store:
    Repository<Zone>
    + Repository<Country>
    + Repository<City>
    + Repository<Quarter>
    + Repository<Street>
    + Repository<Region>
    + Repository<Office>
{
}

impl<T> Store for T where
    T: Repository<Zone>
        + Repository<Country>
        + Repository<City>
        + Repository<Quarter>
        + Repository<Street>
        + Repository<Region>
        + Repository<Office>
        + ?Sized
{
}

/// Rows of one kind with a business-key index.
///
/// Keys need not be unique: the index points at the first row stored
/// under a key.
#[derive(Debug, Clone)]
pub struct Table<E: Entity> {
    rows: Vec<Stored<E>>,
    index: HashMap<E::Key, usize>,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    fn from_rows(rows: Vec<Stored<E>>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            index.entry(row.entity.key()).or_insert(position);
        }
        Self { rows, index }
    }

    fn find(&self, key: &E::Key) -> Option<Stored<E>> {
        self.index
            .get(key)
            .and_then(|&position| self.rows.get(position))
            .cloned()
    }

    fn insert(&mut self, entity: E) -> Stored<E> {
        let position = self.rows.len();
        let stored = Stored::new(RowId(position as u64 + 1), entity);
        self.index.entry(stored.entity.key()).or_insert(position);
        self.rows.push(stored.clone());
        stored
    }

    /// Position of row `id`. Row ids are 1-based positions.
    fn position(&self, id: RowId) -> Option<usize> {
        usize::try_from(id.0)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .filter(|&position| self.rows.get(position).is_some_and(|row| row.id == id))
    }

    fn get(&self, id: RowId) -> Option<Stored<E>> {
        self.position(id).map(|position| self.rows[position].clone())
    }

    fn replace(&mut self, record: &Stored<E>) -> CoreResult<()> {
        let position = self.position(record.id).ok_or(CoreError::RowNotFound {
            kind: E::KIND,
            id: record.id.0,
        })?;

        let old_key = self.rows[position].entity.key();
        let new_key = record.entity.key();
        if old_key != new_key {
            if self.index.get(&old_key) == Some(&position) {
                self.index.remove(&old_key);
            }
            self.index.entry(new_key).or_insert(position);
        }

        self.rows[position] = record.clone();
        Ok(())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<E: Entity> Serialize for Table<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<'de, E: Entity> Deserialize<'de> for Table<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Stored<E>>::deserialize(deserializer).map(Self::from_rows)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    zones: Table<Zone>,
    countries: Table<Country>,
    cities: Table<City>,
    quarters: Table<Quarter>,
    streets: Table<Street>,
    regions: Table<Region>,
    offices: Table<Office>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    tables: Tables,
}

/// An in-memory store.
///
/// Thread-safe: lookups take a read lock and writes a write lock per call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a snapshot written by [`save_snapshot`].
    ///
    /// [`save_snapshot`]: MemoryStore::save_snapshot
    pub fn load_snapshot(path: &Path) -> CoreResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = ciborium::from_reader(reader)
            .map_err(|e| CoreError::snapshot(format!("{}: {e}", path.display())))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CoreError::snapshot(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }

        Ok(Self {
            tables: RwLock::new(snapshot.tables),
        })
    }

    /// Loads the snapshot at `path`, or starts empty if there is none.
    pub fn open(path: &Path) -> CoreResult<Self> {
        if path.exists() {
            Self::load_snapshot(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Writes every table to `path` as CBOR.
    ///
    /// The snapshot is written to a temporary file next to `path` and
    /// renamed over it, so an existing snapshot is only replaced by a
    /// complete one.
    pub fn save_snapshot(&self, path: &Path) -> CoreResult<()> {
        let temp_path = temp_path(path);
        let written = self.write_snapshot(&temp_path);
        if written.is_err() {
            // best effort, the original error matters more
            let _ = fs::remove_file(&temp_path);
            return written;
        }

        // Atomic rename
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    fn write_snapshot(&self, path: &Path) -> CoreResult<()> {
        let tables = self.tables.read();
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            tables: &tables,
        };

        let mut writer = BufWriter::new(File::create(path)?);
        ciborium::into_writer(&snapshot, &mut writer)
            .map_err(|e| CoreError::snapshot(format!("{}: {e}", path.display())))?;
        let file = writer
            .into_inner()
            .map_err(|e| CoreError::Io(e.into_error()))?;
        file.sync_all()?;
        Ok(())
    }

    /// Row count per kind, in dependency order.
    pub fn counts(&self) -> Vec<(EntityKind, usize)> {
        let tables = self.tables.read();
        vec![
            (EntityKind::Zone, tables.zones.len()),
            (EntityKind::Country, tables.countries.len()),
            (EntityKind::City, tables.cities.len()),
            (EntityKind::Quarter, tables.quarters.len()),
            (EntityKind::Street, tables.streets.len()),
            (EntityKind::Region, tables.regions.len()),
            (EntityKind::Office, tables.offices.len()),
        ]
    }
}

/// Sibling path a snapshot is written to before it replaces `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    tables: &'a Tables,
}

macro_rules! memory_repository {
    ($($entity:ty => $table:ident),* $(,)?) => {$(
        impl Repository<$entity> for MemoryStore {
            fn find(&self, key: &<$entity as Entity>::Key) -> CoreResult<Option<Stored<$entity>>> {
                Ok(self.tables.read().$table.find(key))
            }

            fn get(&self, id: RowId) -> CoreResult<Option<Stored<$entity>>> {
                Ok(self.tables.read().$table.get(id))
            }

            fn create(&self, entity: $entity) -> CoreResult<Stored<$entity>> {
                Ok(self.tables.write().$table.insert(entity))
            }

            fn update(&self, record: &Stored<$entity>) -> CoreResult<()> {
                self.tables.write().$table.replace(record)
            }

            fn scan_all(&self) -> CoreResult<Vec<Stored<$entity>>> {
                Ok(self.tables.read().$table.rows.clone())
            }

            fn count(&self) -> CoreResult<usize> {
                Ok(self.tables.read().$table.len())
            }
        }
    )*};
}

memory_repository! {
    Zone => zones,
    Country => countries,
    City => cities,
    Quarter => quarters,
    Street => streets,
    Region => regions,
    Office => offices,
}
