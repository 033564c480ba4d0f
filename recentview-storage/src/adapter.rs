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

//! Storage adapter contract
//!
//! A pure I/O boundary: string values under string keys with a per-key
//! expiry. Adapters do not inspect values.

use crate::error::StorageResult;
use std::sync::Arc;
use std::time::Duration;

/// Key-value persistence with per-key expiry.
pub trait StorageAdapter: Send + Sync {
    /// Read a value. Absent and expired keys both return `Ok(None)`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, setting its expiry to `ttl` from now.
    ///
    /// Every write replaces the previous expiry. A zero `ttl` stores a value
    /// that is already expired.
    fn write(&self, key: &str, value: &str, ttl: Duration) -> StorageResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn clear(&self, key: &str) -> StorageResult<()>;

    /// Expiry used when the caller asks for the adapter's default.
    fn default_ttl(&self) -> Option<Duration> {
        None
    }
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for Arc<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) -> StorageResult<()> {
        (**self).write(key, value, ttl)
    }

    fn clear(&self, key: &str) -> StorageResult<()> {
        (**self).clear(key)
    }

    fn default_ttl(&self) -> Option<Duration> {
        (**self).default_ttl()
    }
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) -> StorageResult<()> {
        (**self).write(key, value, ttl)
    }

    fn clear(&self, key: &str) -> StorageResult<()> {
        (**self).clear(key)
    }

    fn default_ttl(&self) -> Option<Duration> {
        (**self).default_ttl()
    }
}
