//! Configuration for the sync engine.

use crate::error::SyncResult;
use eecont_core::{EntityKind, TransformOptions};

/// Configuration for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    kinds: Vec<EntityKind>,
    /// Provider conventions applied by the transformers.
    pub transform: TransformOptions,
}

impl SyncConfig {
    /// Creates a configuration syncing the default kinds.
    pub fn new() -> Self {
        Self {
            kinds: EntityKind::DEFAULT_SYNC.to_vec(),
            transform: TransformOptions::default(),
        }
    }

    /// Restricts the run to `kinds`, reordered into dependency order.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = EntityKind>) -> Self {
        self.kinds = EntityKind::in_dependency_order(kinds);
        self
    }

    /// Restricts the run to kinds given by name.
    ///
    /// An empty list keeps the default kinds.
    pub fn with_kind_names<I, S>(self, names: I) -> SyncResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = names
            .into_iter()
            .map(|name| name.as_ref().parse::<EntityKind>())
            .collect::<Result<Vec<_>, _>>()?;

        if kinds.is_empty() {
            Ok(self)
        } else {
            Ok(self.with_kinds(kinds))
        }
    }

    /// Sets the transformer options.
    pub fn with_transform_options(mut self, options: TransformOptions) -> Self {
        self.transform = options;
        self
    }

    /// Kinds to sync, in dependency order.
    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    #[test]
    fn default_kinds_skip_regions() {
        let config = SyncConfig::default();
        assert_eq!(config.kinds(), &EntityKind::DEFAULT_SYNC);
        assert!(!config.kinds().contains(&EntityKind::Region));
    }

    #[test]
    fn allow_list_is_reordered() {
        let config =
            SyncConfig::new().with_kinds([EntityKind::Office, EntityKind::Zone, EntityKind::Office]);
        assert_eq!(config.kinds(), &[EntityKind::Zone, EntityKind::Office]);
    }

    #[test]
    fn kind_names() {
        let config = SyncConfig::new()
            .with_kind_names(["Region", "city"])
            .unwrap();
        assert_eq!(config.kinds(), &[EntityKind::City, EntityKind::Region]);

        let config = SyncConfig::new().with_kind_names(Vec::<String>::new()).unwrap();
        assert_eq!(config.kinds(), &EntityKind::DEFAULT_SYNC);

        assert!(matches!(
            SyncConfig::new().with_kind_names(["zone", "planet"]),
            Err(SyncError::UnknownKind(name)) if name == "planet"
        ));
    }
}
