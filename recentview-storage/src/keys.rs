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

//! Storage key names

use serde::{Deserialize, Serialize};

/// Key holding the current-format recency list
pub const CURRENT_KEY: &str = "recently_viewed";

/// Key holding the legacy id list
pub const LEGACY_KEY: &str = "recently_viewed_posts";

/// The pair of keys the engine reads and writes for one visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    pub current: String,
    pub legacy: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            current: CURRENT_KEY.to_string(),
            legacy: LEGACY_KEY.to_string(),
        }
    }
}

impl StorageKeys {
    pub fn new(current: impl Into<String>, legacy: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            legacy: legacy.into(),
        }
    }

    /// Prefix both keys, e.g. per site in a multi-site host
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            current: format!("{}{}", prefix, CURRENT_KEY),
            legacy: format!("{}{}", prefix, LEGACY_KEY),
        }
    }
}
