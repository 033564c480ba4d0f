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
//! Recentview Storage
//!
//! Key-value persistence for per-visitor recency state. Values are opaque
//! strings; each write carries its own time-to-live.
//!
//! Provided adapters:
//! - [`InMemoryStore`]: process-local map, for tests and single-process hosts
//! - [`FileStore`]: one JSON envelope per key under a data directory
//! - [`DisabledStore`]: refuses all I/O when persistence is off

pub mod adapter;
pub mod clock;
pub mod disabled;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;

pub use adapter::StorageAdapter;
pub use clock::{add_ttl, Clock, ManualClock, SystemClock};
pub use disabled::DisabledStore;
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use keys::{StorageKeys, CURRENT_KEY, LEGACY_KEY};
pub use memory::InMemoryStore;
