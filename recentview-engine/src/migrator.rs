// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.
//! One-shot migration from the legacy id list
//!
//! A non-empty list under the current key is the only migration marker:
//!
//! ```text
//! current non-empty        -> AlreadyCurrent (no work)
//! current empty, no legacy -> NoLegacyData
//! legacy malformed         -> Rejected (nothing written)
//! legacy valid             -> resolve ids, write current list -> Migrated
//! ```
//!
//! Ids that no longer resolve are dropped. An empty migration result is not
//! written, so the current key stays absent until the first recorded view.

use crate::engine::effective_ttl;
use crate::legacy::LegacyPayload;
use crate::resolver::ContentResolver;
use recentview_core::{RecencyList, RecentViewError, TrackerConfig, ViewedItem};
use recentview_storage::{StorageAdapter, StorageError, StorageKeys};
use tracing::{debug, info, warn};

/// Result of a migration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// A current-format list exists; nothing was done
    AlreadyCurrent,
    /// Legacy ids were converted
    Migrated {
        /// Items written under the current key
        migrated: usize,
        /// Ids dropped because they did not resolve or exceeded capacity
        dropped: usize,
    },
    /// The legacy payload failed validation
    Rejected,
    /// Neither format holds any state
    NoLegacyData,
}

impl MigrationOutcome {
    /// Whether this attempt touched the legacy payload
    pub fn did_work(&self) -> bool {
        matches!(self, MigrationOutcome::Migrated { .. } | MigrationOutcome::Rejected)
    }
}

/// Converts legacy state into the current format
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyMigrator {
    clear_legacy: bool,
}

impl LegacyMigrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the legacy key after a successful migration
    ///
    /// Off by default; the legacy key is otherwise left to expire.
    pub fn clear_legacy_after_migration(mut self, clear: bool) -> Self {
        self.clear_legacy = clear;
        self
    }

    /// Resolve legacy ids into a list, most recent first
    ///
    /// Returns the list and the number of ids that were dropped.
    pub fn convert<R>(
        &self,
        payload: &LegacyPayload,
        resolver: &R,
        capacity: usize,
    ) -> (RecencyList, usize)
    where
        R: ContentResolver + ?Sized,
    {
        let resolved: Vec<ViewedItem> = payload
            .ids()
            .iter()
            .filter_map(|id| {
                let item = resolver
                    .resolve(id)
                    .and_then(|meta| ViewedItem::new(id.clone(), &meta.url, &meta.title));
                if item.is_none() {
                    let err = RecentViewError::UnresolvableLegacyItem(id.to_string());
                    debug!(error = %err, "Dropping legacy id");
                }
                item
            })
            .collect();

        let list = RecencyList::from_items(resolved, capacity);
        let dropped = payload.len() - list.len();
        (list, dropped)
    }

    /// Migrate legacy state unless a current-format list already exists
    pub fn migrate_if_needed<S, R>(
        &self,
        storage: &S,
        keys: &StorageKeys,
        resolver: &R,
        config: &TrackerConfig,
    ) -> MigrationOutcome
    where
        S: StorageAdapter + ?Sized,
        R: ContentResolver + ?Sized,
    {
        self.load(storage, keys, resolver, config).0
    }

    /// Load the current list, migrating first when it is empty
    pub(crate) fn load<S, R>(
        &self,
        storage: &S,
        keys: &StorageKeys,
        resolver: &R,
        config: &TrackerConfig,
    ) -> (MigrationOutcome, RecencyList)
    where
        S: StorageAdapter + ?Sized,
        R: ContentResolver + ?Sized,
    {
        let current = read_current(storage, keys, config.capacity);
        if !current.is_empty() {
            return (MigrationOutcome::AlreadyCurrent, current);
        }

        let raw = match storage.read(&keys.legacy) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (MigrationOutcome::NoLegacyData, current),
            Err(e) => {
                warn!(key = %keys.legacy, error = %unavailable(e), "Legacy state unreadable");
                return (MigrationOutcome::NoLegacyData, current);
            }
        };

        let payload = match LegacyPayload::decode(&raw) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %keys.legacy, error = %e, "Rejected legacy payload");
                return (MigrationOutcome::Rejected, current);
            }
        };

        let (list, dropped) = self.convert(&payload, resolver, config.capacity);
        let outcome = MigrationOutcome::Migrated {
            migrated: list.len(),
            dropped,
        };

        if list.is_empty() {
            debug!(dropped, "Legacy migration produced no items; nothing written");
            return (outcome, list);
        }

        if let Err(e) = write_list(storage, keys, &list, config) {
            warn!(key = %keys.current, error = %e, "Failed to persist migrated list");
            return (outcome, list);
        }

        info!(
            "Migrated {} legacy items ({} dropped)",
            list.len(),
            dropped
        );

        if self.clear_legacy {
            if let Err(e) = storage.clear(&keys.legacy) {
                warn!(key = %keys.legacy, error = %unavailable(e), "Failed to clear legacy state");
            }
        }

        (outcome, list)
    }
}

/// Migrate with the default [`LegacyMigrator`] policy
pub fn migrate_if_needed<S, R>(
    storage: &S,
    keys: &StorageKeys,
    resolver: &R,
    config: &TrackerConfig,
) -> MigrationOutcome
where
    S: StorageAdapter + ?Sized,
    R: ContentResolver + ?Sized,
{
    LegacyMigrator::default().migrate_if_needed(storage, keys, resolver, config)
}

/// Read the current list; unreadable or corrupt state is empty
pub(crate) fn read_current<S>(storage: &S, keys: &StorageKeys, capacity: usize) -> RecencyList
where
    S: StorageAdapter + ?Sized,
{
    match storage.read(&keys.current) {
        Ok(Some(raw)) => RecencyList::from_json(&raw, capacity).unwrap_or_else(|e| {
            warn!(key = %keys.current, error = %e, "Corrupt recency list, starting empty");
            RecencyList::new()
        }),
        Ok(None) => RecencyList::new(),
        Err(e) => {
            warn!(key = %keys.current, error = %unavailable(e), "Recency list unreadable");
            RecencyList::new()
        }
    }
}

pub(crate) fn write_list<S>(
    storage: &S,
    keys: &StorageKeys,
    list: &RecencyList,
    config: &TrackerConfig,
) -> Result<(), RecentViewError>
where
    S: StorageAdapter + ?Sized,
{
    let raw = list.to_json()?;
    storage
        .write(&keys.current, &raw, effective_ttl(storage, config))
        .map_err(unavailable)
}

pub(crate) fn unavailable(e: StorageError) -> RecentViewError {
    RecentViewError::StorageUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::NoopResolver;
    use recentview_core::{ContentMetadata, ItemId};
    use recentview_storage::InMemoryStore;
    use std::time::Duration;

    fn post_resolver(id: &ItemId) -> Option<ContentMetadata> {
        match id {
            ItemId::Int(n) if *n % 2 == 1 => Some(ContentMetadata::new(
                *n,
                format!("https://example.com/?p={}", n),
                format!("<b>Post</b> {}", n),
            )),
            _ => None,
        }
    }

    fn seeded(legacy: &str) -> (InMemoryStore, StorageKeys) {
        let store = InMemoryStore::new();
        let keys = StorageKeys::default();
        store
            .write(&keys.legacy, legacy, Duration::from_secs(3600))
            .unwrap();
        (store, keys)
    }

    #[test]
    fn test_convert_drops_unresolvable_ids() {
        let payload = LegacyPayload::decode("[1, 2, 3, 4, 5]").unwrap();
        let (list, dropped) = LegacyMigrator::new().convert(&payload, &post_resolver, 10);
        let ids: Vec<_> = list.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![ItemId::Int(1), ItemId::Int(3), ItemId::Int(5)]);
        assert_eq!(dropped, 2);
        assert_eq!(list.items()[0].title, "Post 1");
    }

    #[test]
    fn test_convert_truncates_to_capacity() {
        let payload = LegacyPayload::decode("[1, 3, 5, 7]").unwrap();
        let (list, dropped) = LegacyMigrator::new().convert(&payload, &post_resolver, 2);
        assert_eq!(list.len(), 2);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_migrates_once() {
        let (store, keys) = seeded("[3, 1]");
        let config = TrackerConfig::default();

        let first = migrate_if_needed(&store, &keys, &post_resolver, &config);
        assert_eq!(
            first,
            MigrationOutcome::Migrated {
                migrated: 2,
                dropped: 0
            }
        );
        assert!(store.read(&keys.current).unwrap().is_some());
        assert!(store.read(&keys.legacy).unwrap().is_some());

        let second = migrate_if_needed(&store, &keys, &post_resolver, &config);
        assert_eq!(second, MigrationOutcome::AlreadyCurrent);
        assert!(!second.did_work());
    }

    #[test]
    fn test_clear_legacy_after_migration() {
        let (store, keys) = seeded("[1]");
        let migrator = LegacyMigrator::new().clear_legacy_after_migration(true);
        migrator.migrate_if_needed(&store, &keys, &post_resolver, &TrackerConfig::default());
        assert!(store.read(&keys.legacy).unwrap().is_none());
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        let (store, keys) = seeded(r#"{"not":"a list"}"#);
        let outcome = migrate_if_needed(&store, &keys, &post_resolver, &TrackerConfig::default());
        assert_eq!(outcome, MigrationOutcome::Rejected);
        assert!(store.read(&keys.current).unwrap().is_none());
    }

    #[test]
    fn test_empty_result_is_not_written() {
        let (store, keys) = seeded("[1, 3]");
        let outcome = migrate_if_needed(&store, &keys, &NoopResolver, &TrackerConfig::default());
        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                migrated: 0,
                dropped: 2
            }
        );
        assert!(store.read(&keys.current).unwrap().is_none());
    }

    #[test]
    fn test_no_legacy_data() {
        let store = InMemoryStore::new();
        let outcome = migrate_if_needed(
            &store,
            &StorageKeys::default(),
            &post_resolver,
            &TrackerConfig::default(),
        );
        assert_eq!(outcome, MigrationOutcome::NoLegacyData);
    }
}
