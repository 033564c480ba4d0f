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

//! Tracker configuration and layered override resolution
//!
//! The host resolves one [`TrackerConfig`] per page view and passes it to the
//! engine; the engine never looks configuration up on its own. Overrides can
//! come from several places, so [`ConfigResolver`] merges them with a fixed
//! precedence:
//!
//! ```text
//! Defaults < LegacyGlobal < SiteFilter < Explicit
//! ```
//!
//! # Example TOML layer
//!
//! ```toml
//! capacity = 8
//! expiration_days = 30
//! eligible_types = ["post", "page"]
//! ```

use crate::error::{RecentViewError, RecentViewResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Default number of items kept per visitor
pub const DEFAULT_CAPACITY: usize = 5;

/// Default expiry in days
pub const DEFAULT_EXPIRATION_DAYS: u64 = 360;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Default expiry in seconds (360 days)
pub const DEFAULT_EXPIRATION_SECONDS: u64 = DEFAULT_EXPIRATION_DAYS * SECONDS_PER_DAY;

/// Content types tracked when nothing overrides them
pub const DEFAULT_ELIGIBLE_TYPES: &[&str] = &["post"];

/// Resolved configuration for one page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum list length (0 = always empty)
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Time-to-live applied on every write (0 = storage default, see engine)
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: u64,

    /// Content types that may be tracked
    #[serde(default = "default_eligible_types")]
    pub eligible_types: BTreeSet<String>,

    /// Host decision: record the current page as a view
    #[serde(default)]
    pub should_record_current_view: bool,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_expiration_seconds() -> u64 {
    DEFAULT_EXPIRATION_SECONDS
}

fn default_eligible_types() -> BTreeSet<String> {
    DEFAULT_ELIGIBLE_TYPES.iter().map(|t| t.to_string()).collect()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            expiration_seconds: default_expiration_seconds(),
            eligible_types: default_eligible_types(),
            should_record_current_view: false,
        }
    }
}

impl TrackerConfig {
    /// Set the capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the expiry in seconds.
    pub fn expiration_seconds(mut self, seconds: u64) -> Self {
        self.expiration_seconds = seconds;
        self
    }

    /// Replace the eligible content types.
    pub fn eligible_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eligible_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether the current page view is recorded.
    pub fn recording(mut self, record: bool) -> Self {
        self.should_record_current_view = record;
        self
    }

    /// Expiry as a Duration.
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_seconds)
    }

    pub fn is_eligible_type(&self, content_type: &str) -> bool {
        self.eligible_types.contains(content_type)
    }

    /// Eligibility gate for hosts
    ///
    /// A page is trackable when its content type is eligible and it is not the
    /// listing page that displays the recently viewed list.
    pub fn is_trackable(&self, content_type: &str, is_listing_page: bool) -> bool {
        !is_listing_page && self.is_eligible_type(content_type)
    }

    /// Apply the host's eligibility decision for the current page
    pub fn for_page(self, content_type: &str, is_listing_page: bool) -> Self {
        let record = self.is_trackable(content_type, is_listing_page);
        self.recording(record)
    }
}

/// Where a layer of overrides came from
///
/// Ordering is precedence: later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfigSource {
    Defaults,
    /// Backward-compatible global settings from older installs
    LegacyGlobal,
    /// Site-level filter overrides
    SiteFilter,
    /// Explicit per-call override
    Explicit,
}

/// A partial set of configuration values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub expiration_seconds: Option<u64>,
    /// Legacy unit; ignored when `expiration_seconds` is set in the same layer
    #[serde(default)]
    pub expiration_days: Option<u64>,
    #[serde(default)]
    pub eligible_types: Option<BTreeSet<String>>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> RecentViewResult<Self> {
        serde_json::from_str(json).map_err(|e| RecentViewError::Config(e.to_string()))
    }

    pub fn from_toml(toml_str: &str) -> RecentViewResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn expiration_seconds(mut self, seconds: u64) -> Self {
        self.expiration_seconds = Some(seconds);
        self
    }

    pub fn expiration_days(mut self, days: u64) -> Self {
        self.expiration_days = Some(days);
        self
    }

    pub fn eligible_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eligible_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    fn resolved_expiration(&self) -> Option<u64> {
        self.expiration_seconds.or_else(|| {
            self.expiration_days
                .map(|days| days.saturating_mul(SECONDS_PER_DAY))
        })
    }

    fn apply_to(&self, config: &mut TrackerConfig) {
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(seconds) = self.resolved_expiration() {
            config.expiration_seconds = seconds;
        }
        if let Some(types) = &self.eligible_types {
            config.eligible_types = types.clone();
        }
    }
}

/// Merges override layers into one [`TrackerConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    layers: Vec<(ConfigSource, ConfigOverrides)>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer (builder style).
    pub fn with_layer(mut self, source: ConfigSource, overrides: ConfigOverrides) -> Self {
        self.push(source, overrides);
        self
    }

    /// Add a layer. Within one source, later layers win.
    pub fn push(&mut self, source: ConfigSource, overrides: ConfigOverrides) {
        self.layers.push((source, overrides));
    }

    /// Resolve all layers on top of the defaults
    ///
    /// `should_record_current_view` is always false here; it is a per-page
    /// decision applied with [`TrackerConfig::for_page`] or
    /// [`TrackerConfig::recording`].
    pub fn resolve(&self) -> TrackerConfig {
        let mut ordered: Vec<&(ConfigSource, ConfigOverrides)> = self.layers.iter().collect();
        // Stable sort keeps insertion order within a source
        ordered.sort_by_key(|(source, _)| *source);

        let mut config = TrackerConfig::default();
        for (source, overrides) in ordered {
            overrides.apply_to(&mut config);
            tracing::trace!(?source, "Applied configuration layer");
        }

        tracing::debug!(
            capacity = config.capacity,
            expiration_seconds = config.expiration_seconds,
            eligible_types = config.eligible_types.len(),
            "Resolved tracker configuration"
        );

        config
    }
}
