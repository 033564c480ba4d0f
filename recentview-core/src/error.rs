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

//! Recently viewed error types
//!
//! Tracking is best-effort: the engine absorbs every variant below and falls
//! back to an empty or partial list. The types exist so that each layer can
//! say precisely what went wrong before the failure is logged and dropped.

use thiserror::Error;

/// Result type for recently viewed operations
pub type RecentViewResult<T> = Result<T, RecentViewError>;

/// Errors that can occur while tracking recently viewed items
#[derive(Debug, Error)]
pub enum RecentViewError {
    /// The backing store could not be read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A legacy payload failed structural validation
    #[error("Malformed legacy payload: {0}")]
    MalformedLegacyPayload(String),

    /// A legacy id no longer maps to live content
    #[error("Unresolvable legacy item: {0}")]
    UnresolvableLegacyItem(String),

    /// Persisted state could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RecentViewError {
    fn from(e: serde_json::Error) -> Self {
        RecentViewError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RecentViewError {
    fn from(e: toml::de::Error) -> Self {
        RecentViewError::Config(e.to_string())
    }
}
