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

//! Recentview Core
//!
//! Data types shared by the storage adapters and the recency engine:
//! - **Items**: [`ItemId`], [`ViewedItem`] and the raw [`ContentMetadata`]
//!   they are built from
//! - **Recency list**: ordered, de-duplicated, capacity-bounded list
//! - **Configuration**: per-page [`TrackerConfig`] and layered override
//!   resolution
//! - **Errors**: the tracking error taxonomy

pub mod config;
pub mod error;
pub mod item;
pub mod list;
pub mod normalize;
pub mod state;

pub use config::{
    ConfigOverrides, ConfigResolver, ConfigSource, TrackerConfig, DEFAULT_CAPACITY,
    DEFAULT_ELIGIBLE_TYPES, DEFAULT_EXPIRATION_DAYS, DEFAULT_EXPIRATION_SECONDS,
    SECONDS_PER_DAY,
};
pub use error::{RecentViewError, RecentViewResult};
pub use item::{ContentMetadata, ItemId, ViewedItem, MAX_STRING_ID_LENGTH};
pub use list::RecencyList;
pub use normalize::{normalize_url, strip_html, MAX_TITLE_LENGTH, MAX_URL_LENGTH};
pub use state::ListState;
