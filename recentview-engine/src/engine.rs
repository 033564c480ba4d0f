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
//! Recency list engine
//!
//! One engine serves one visitor's storage context. Every operation is a
//! single load, mutate, persist round trip with no state kept between calls,
//! so the capacity from the current [`TrackerConfig`] is re-applied each time.
//!
//! Tracking is best-effort: storage and decoding failures are logged and the
//! engine falls back to an empty or partial list.

use crate::migrator::{read_current, unavailable, write_list, LegacyMigrator, MigrationOutcome};
use crate::resolver::{ContentResolver, NoopResolver};
use recentview_core::{ContentMetadata, ItemId, RecencyList, TrackerConfig, ViewedItem};
use recentview_storage::{StorageAdapter, StorageKeys};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Expiry for a write under `config`
///
/// `expiration_seconds = 0` falls back to the adapter's default, and to an
/// immediately expired write when the adapter has none.
pub fn effective_ttl<S>(storage: &S, config: &TrackerConfig) -> Duration
where
    S: StorageAdapter + ?Sized,
{
    if config.expiration_seconds == 0 {
        storage.default_ttl().unwrap_or(Duration::ZERO)
    } else {
        config.expiration()
    }
}

/// What the host knows about the page being served
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    /// Metadata of the content on this page, if it is a content page
    pub current: Option<ContentMetadata>,
}

impl PageView {
    /// A page showing one content item
    pub fn content(metadata: ContentMetadata) -> Self {
        Self {
            current: Some(metadata),
        }
    }

    /// A page with no current item (archive, home, listing)
    pub fn other() -> Self {
        Self::default()
    }

    /// Canonical id of the current item, as it would be stored
    pub fn current_id(&self) -> Option<ItemId> {
        self.current
            .as_ref()
            .and_then(|meta| meta.id.clone().normalized())
    }
}

/// Per-visitor recently viewed tracker
pub struct RecencyEngine<S, R = NoopResolver> {
    storage: S,
    resolver: R,
    keys: StorageKeys,
    migrator: LegacyMigrator,
}

impl<S: StorageAdapter> RecencyEngine<S, NoopResolver> {
    /// Engine that never migrates legacy ids into items
    pub fn without_resolver(storage: S) -> Self {
        Self::new(storage, NoopResolver)
    }
}

impl<S, R> RecencyEngine<S, R>
where
    S: StorageAdapter,
    R: ContentResolver,
{
    pub fn new(storage: S, resolver: R) -> Self {
        Self {
            storage,
            resolver,
            keys: StorageKeys::default(),
            migrator: LegacyMigrator::default(),
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_migrator(mut self, migrator: LegacyMigrator) -> Self {
        self.migrator = migrator;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Run legacy migration on its own, without reading the list
    pub fn migrate(&self, config: &TrackerConfig) -> MigrationOutcome {
        self.migrator
            .migrate_if_needed(&self.storage, &self.keys, &self.resolver, config)
    }

    /// Record a view of `item` and return the updated list
    ///
    /// The item moves to the front (or is inserted there), older entries
    /// beyond `config.capacity` are dropped and the list is persisted with a
    /// refreshed expiry. If the write fails the stored list is returned
    /// unchanged.
    pub fn record_view(&self, item: ContentMetadata, config: &TrackerConfig) -> Vec<ViewedItem> {
        if config.capacity == 0 {
            trace!("Capacity is zero; not recording");
            return Vec::new();
        }

        let mut list = self.load(config);

        let id = item.id.clone();
        let Some(viewed) = item.into_viewed_item() else {
            warn!(id = %id, "Content has an unusable id or link; view not recorded");
            return list.into_items();
        };

        let previous = list.clone();
        list.record(viewed, config.capacity);

        if !self.persist(&list, config) {
            return previous.into_items();
        }

        let after = list.state();
        if previous.state().is_creation(after) {
            debug!(key = %self.keys.current, "Recency list created");
        }
        trace!(id = %id, len = after.len(), capacity = config.capacity, "Recorded view");

        list.into_items()
    }

    /// The recently viewed items, minus `exclude`
    ///
    /// Never re-orders and never writes except for a pending migration.
    pub fn recent_items(&self, exclude: Option<&ItemId>, config: &TrackerConfig) -> Vec<ViewedItem> {
        if config.capacity == 0 {
            return Vec::new();
        }
        self.load(config).without(exclude)
    }

    /// Full per-page flow
    ///
    /// Records the current item when the host allows it, then returns the list
    /// without the current item.
    pub fn handle_page_view(&self, page: &PageView, config: &TrackerConfig) -> Vec<ViewedItem> {
        if config.should_record_current_view {
            if let Some(meta) = &page.current {
                self.record_view(meta.clone(), config);
            }
        }
        self.recent_items(page.current_id().as_ref(), config)
    }

    /// Drop the visitor's list
    ///
    /// Clears the legacy key as well, otherwise the next read would migrate
    /// the old ids back in.
    pub fn forget(&self) -> Vec<ViewedItem> {
        for key in [&self.keys.current, &self.keys.legacy] {
            match self.storage.clear(key) {
                Ok(()) => debug!(key = %key, "Cleared recency state"),
                Err(e) => warn!(key = %key, error = %unavailable(e), "Failed to clear recency state"),
            }
        }
        Vec::new()
    }

    /// Current list without triggering migration
    pub fn peek(&self, config: &TrackerConfig) -> Vec<ViewedItem> {
        read_current(&self.storage, &self.keys, config.capacity).into_items()
    }

    fn load(&self, config: &TrackerConfig) -> RecencyList {
        let (outcome, list) = self
            .migrator
            .load(&self.storage, &self.keys, &self.resolver, config);
        if outcome.did_work() {
            debug!(?outcome, "Legacy migration attempted");
        }
        list
    }

    fn persist(&self, list: &RecencyList, config: &TrackerConfig) -> bool {
        match write_list(&self.storage, &self.keys, list, config) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.keys.current, error = %e, "Failed to persist recency list");
                false
            }
        }
    }
}
