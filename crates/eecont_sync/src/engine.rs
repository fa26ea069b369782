//! The sync loop.

use crate::applier::{StoreApplier, Upsert};
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::transport::SourceTransport;
use eecont_core::transform::{self, Transform, Transformer};
use eecont_core::{
    resolve, City, CoreError, Country, EntityKind, Office, Quarter, Region, Repository, Resolve,
    Store, Street, Zone,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of syncing one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindReport {
    /// The synced kind.
    pub kind: EntityKind,
    /// Raw records fetched.
    pub fetched: usize,
    /// Rows created.
    pub inserted: usize,
    /// Rows overwritten.
    pub updated: usize,
    /// Records skipped after a record-scoped failure.
    pub failed: usize,
}

impl KindReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            fetched: 0,
            inserted: 0,
            updated: 0,
            failed: 0,
        }
    }
}

impl fmt::Display for KindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: fetched {}, inserted {}, updated {}, failed {}",
            self.kind, self.fetched, self.inserted, self.updated, self.failed
        )
    }
}

/// Outcome of a sync run, one entry per synced kind in sync order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Per-kind outcomes.
    pub kinds: Vec<KindReport>,
}

impl SyncReport {
    /// Returns the report for `kind`, if it was synced.
    pub fn get(&self, kind: EntityKind) -> Option<&KindReport> {
        self.kinds.iter().find(|report| report.kind == kind)
    }

    /// Records skipped across every kind.
    pub fn total_failed(&self) -> usize {
        self.kinds.iter().map(|report| report.failed).sum()
    }
}

/// Syncs provider reference data into a store.
pub struct SyncEngine<T: SourceTransport, S: Store + ?Sized> {
    config: SyncConfig,
    transport: T,
    applier: StoreApplier<S>,
    transformer: Transformer,
}

impl<T: SourceTransport, S: Store + ?Sized> SyncEngine<T, S> {
    /// Creates a new sync engine.
    pub fn new(config: SyncConfig, transport: T, store: Arc<S>) -> Self {
        let transformer = Transformer::new(config.transform.clone());
        Self {
            config,
            transport,
            applier: StoreApplier::new(store),
            transformer,
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Gets the store.
    pub fn store(&self) -> &Arc<S> {
        self.applier.store()
    }

    /// Syncs every configured kind in dependency order.
    ///
    /// Record-scoped failures are logged, counted and skipped. Transport
    /// and storage failures abort the run.
    pub fn run(&self) -> SyncResult<SyncReport> {
        let mut report = SyncReport::default();
        for &kind in self.config.kinds() {
            let kind_report = match kind {
                EntityKind::Zone => self.sync_kind::<Zone>()?,
                EntityKind::Country => self.sync_kind::<Country>()?,
                EntityKind::City => self.sync_kind::<City>()?,
                EntityKind::Quarter => self.sync_kind::<Quarter>()?,
                EntityKind::Street => self.sync_kind::<Street>()?,
                EntityKind::Region => self.sync_kind::<Region>()?,
                EntityKind::Office => self.sync_kind::<Office>()?,
            };
            report.kinds.push(kind_report);
        }

        tracing::info!(
            kinds = report.kinds.len(),
            failed = report.total_failed(),
            "sync finished"
        );
        Ok(report)
    }

    fn sync_kind<E>(&self) -> SyncResult<KindReport>
    where
        E: Transform + Resolve,
        S: Repository<E>,
    {
        let kind = E::KIND;
        tracing::info!(%kind, "Now processing");

        let raw = self.transport.fetch(kind)?;
        let records = transform::records(&raw);
        let mut report = KindReport::new(kind);
        report.fetched = records.len();
        tracing::info!(%kind, fetched = report.fetched, "fetched batch");

        for (index, record) in records.into_iter().enumerate() {
            let entity: E = match self.transformer.one(record) {
                Ok(entity) => entity,
                Err(err) => {
                    isolate(&mut report, index, raw_key(record), err)?;
                    continue;
                }
            };

            let key = entity.key().to_string();
            let outcome = resolve(entity, &**self.store())
                .and_then(|entity| self.applier.upsert(entity));
            match outcome {
                Ok(Upsert::Inserted(_)) => report.inserted += 1,
                Ok(Upsert::Updated(_)) => report.updated += 1,
                Err(err) => isolate(&mut report, index, Some(key), err)?,
            }
        }

        tracing::info!(
            %kind,
            inserted = report.inserted,
            updated = report.updated,
            failed = report.failed,
            "synced"
        );
        Ok(report)
    }
}

/// Counts a record-scoped failure, or hands any other failure back.
fn isolate(
    report: &mut KindReport,
    index: usize,
    key: Option<String>,
    err: CoreError,
) -> SyncResult<()> {
    if !err.is_record_error() {
        return Err(err.into());
    }

    tracing::warn!(
        kind = %report.kind,
        index,
        key = key.as_deref().unwrap_or("?"),
        error = %err,
        "skipping record"
    );
    report.failed += 1;
    Ok(())
}

/// Best-effort business key of a raw record, for log context.
fn raw_key(record: &Value) -> Option<String> {
    ["id", "country_name"]
        .into_iter()
        .find_map(|field| record.get(field))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::transport::MockTransport;
    use eecont_core::MemoryStore;
    use serde_json::json;

    fn zone_record(id: &str, name: &str) -> Value {
        json!({"id": id, "is_ee": "1", "name": name, "name_en": name,
               "national": "1", "updated_time": "2013-02-18 12:13:14"})
    }

    fn engine(transport: MockTransport) -> SyncEngine<MockTransport, MemoryStore> {
        SyncEngine::new(SyncConfig::new(), transport, Arc::new(MemoryStore::new()))
    }

    #[test]
    fn reports_every_configured_kind() {
        let engine = engine(MockTransport::new());
        let report = engine.run().unwrap();

        let kinds: Vec<_> = report.kinds.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, EntityKind::DEFAULT_SYNC);
        assert_eq!(report.total_failed(), 0);
    }

    #[test]
    fn bad_record_is_skipped() {
        let transport = MockTransport::new();
        transport.set_batch(
            EntityKind::Zone,
            json!([zone_record("1", "One"), zone_record("bad", "Two"), zone_record("3", "Three")]),
        );

        let engine = engine(transport);
        let report = engine.run().unwrap();
        let zones = report.get(EntityKind::Zone).unwrap();
        assert_eq!(zones.fetched, 3);
        assert_eq!(zones.inserted, 2);
        assert_eq!(zones.failed, 1);
    }

    #[test]
    fn transport_failure_aborts() {
        let transport = MockTransport::new();
        transport.set_connected(false);
        assert!(matches!(
            engine(transport).run(),
            Err(SyncError::Transport { .. })
        ));
    }

    #[test]
    fn raw_key_context() {
        assert_eq!(raw_key(&json!({"id": "648"})), Some("648".into()));
        assert_eq!(raw_key(&json!({"id": 7})), Some("7".into()));
        assert_eq!(
            raw_key(&json!({"country_name": "България"})),
            Some("България".into())
        );
        assert_eq!(raw_key(&json!("garbage")), None);
    }

    #[test]
    fn kind_report_display() {
        let mut report = KindReport::new(EntityKind::Office);
        report.fetched = 3;
        report.inserted = 2;
        report.failed = 1;
        assert_eq!(
            report.to_string(),
            "office: fetched 3, inserted 2, updated 0, failed 1"
        );
    }
}
