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
//! Recentview Engine
//!
//! Records content views per visitor and serves the "recently viewed" list:
//!
//! - [`RecencyEngine`]: record, read, per-page flow and opt-out
//! - [`LegacyMigrator`]: one-shot conversion of the legacy id list
//! - [`ContentResolver`]: id to metadata lookup used during migration
//!
//! # Example
//!
//! ```
//! use recentview_core::{ContentMetadata, TrackerConfig};
//! use recentview_engine::{PageView, RecencyEngine};
//! use recentview_storage::InMemoryStore;
//!
//! let engine = RecencyEngine::without_resolver(InMemoryStore::new());
//! let config = TrackerConfig::default().recording(true);
//!
//! let page = PageView::content(ContentMetadata::new(1u64, "https://example.com/?p=1", "First"));
//! assert!(engine.handle_page_view(&page, &config).is_empty());
//!
//! let page = PageView::content(ContentMetadata::new(2u64, "https://example.com/?p=2", "Second"));
//! let shown = engine.handle_page_view(&page, &config);
//! assert_eq!(shown[0].title, "First");
//! ```

pub mod engine;
pub mod legacy;
pub mod migrator;
pub mod resolver;

pub use engine::{effective_ttl, PageView, RecencyEngine};
pub use legacy::{LegacyPayload, MAX_LEGACY_IDS, MAX_LEGACY_PAYLOAD_BYTES};
pub use migrator::{migrate_if_needed, LegacyMigrator, MigrationOutcome};
pub use resolver::{ContentResolver, NoopResolver};
