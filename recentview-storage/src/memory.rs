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

//! In-memory store with per-key expiry
//!
//! Used for tests, previews and hosts that keep visitor state in process for
//! the lifetime of a session.

use crate::adapter::StorageAdapter;
use crate::clock::{add_ttl, Clock, SystemClock};
use crate::error::StorageResult;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// HashMap-backed [`StorageAdapter`]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
    default_ttl: Option<Duration>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            default_ttl: None,
        }
    }

    /// Set the expiry used for `expiration_seconds = 0`
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Expiry instant of a live key
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.entries
            .read()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.expires_at)
    }

    /// Number of live (unexpired) keys
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

impl StorageAdapter for InMemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let now = self.clock.now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: evict lazily
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
            tracing::trace!(key, "Evicted expired entry");
        }
        Ok(None)
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) -> StorageResult<()> {
        let expires_at = add_ttl(self.clock.now(), ttl);
        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn clear(&self, key: &str) -> StorageResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}
