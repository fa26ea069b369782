//! Counts command implementation.

use eecont_core::{EntityKind, MemoryStore};
use serde::Serialize;
use std::path::Path;

/// Row count of one kind.
#[derive(Debug, Serialize)]
pub struct KindCount {
    /// Entity kind.
    pub kind: EntityKind,
    /// Number of stored rows.
    pub rows: usize,
}

/// Runs the counts command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No store found at {:?}", path).into());
    }
    let counts = collect(&MemoryStore::load_snapshot(path)?);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        _ => {
            println!("Store: {}", path.display());
            for count in &counts {
                println!("  {:<8} {}", count.kind, count.rows);
            }
        }
    }

    Ok(())
}

/// Row counts per kind, in dependency order.
pub fn collect(store: &MemoryStore) -> Vec<KindCount> {
    store
        .counts()
        .into_iter()
        .map(|(kind, rows)| KindCount { kind, rows })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eecont_sync::{SyncConfig, SyncEngine};
    use eecont_testkit::{fixtures, ScriptedTransport};
    use std::sync::Arc;

    #[test]
    fn counts_follow_dependency_order() {
        let store = Arc::new(MemoryStore::new());
        SyncEngine::new(
            SyncConfig::new(),
            ScriptedTransport::with_fixtures(),
            Arc::clone(&store),
        )
        .run()
        .unwrap();

        let counts = collect(&store);
        let kinds: Vec<_> = counts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, EntityKind::DEPENDENCY_ORDER);
        for count in &counts {
            let expected = match count.kind {
                EntityKind::Region => 0,
                kind => fixtures::record_count(kind),
            };
            assert_eq!(count.rows, expected, "{}", count.kind);
        }
    }

    #[test]
    fn json_uses_kind_names() {
        let counts = vec![KindCount {
            kind: EntityKind::Office,
            rows: 2,
        }];
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"[{"kind":"office","rows":2}]"#
        );
    }

    #[test]
    fn missing_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("absent.cbor"), "text").is_err());
    }
}
