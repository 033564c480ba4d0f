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
//! Store used when persistence is turned off
//!
//! Every operation fails with [`StorageError::Unavailable`]. The engine treats
//! that as "no state" and keeps serving empty lists.

use crate::adapter::StorageAdapter;
use crate::error::{StorageError, StorageResult};
use std::time::Duration;

const DISABLED_REASON: &str = "storage disabled";

/// [`StorageAdapter`] that refuses all I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl DisabledStore {
    pub fn new() -> Self {
        Self
    }
}

impl StorageAdapter for DisabledStore {
    fn read(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable(DISABLED_REASON.to_string()))
    }

    fn write(&self, _key: &str, _value: &str, _ttl: Duration) -> StorageResult<()> {
        Err(StorageError::Unavailable(DISABLED_REASON.to_string()))
    }

    fn clear(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable(DISABLED_REASON.to_string()))
    }
}
