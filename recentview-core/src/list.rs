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

//! Ordered, bounded, de-duplicated list of viewed items
//!
//! Index 0 is always the most recently recorded item. Capacity is not part of
//! the list: callers pass it on every mutation and every load, so a changed
//! configuration applies immediately to state that was persisted under the
//! old one.

use crate::error::RecentViewResult;
use crate::item::{ItemId, ViewedItem};
use crate::state::ListState;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-visitor recency list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecencyList {
    items: Vec<ViewedItem>,
}

impl RecencyList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from items already in recency order
    ///
    /// Later duplicates of an id are dropped (the first occurrence is the most
    /// recent) and the result is truncated to `capacity`.
    pub fn from_items(items: impl IntoIterator<Item = ViewedItem>, capacity: usize) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .take(capacity)
            .collect();
        Self { items }
    }

    /// Record a view: move or insert `item` at the front, then bound the length
    pub fn record(&mut self, item: ViewedItem, capacity: usize) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
        self.truncate(capacity);
    }

    /// Drop the oldest entries beyond `capacity`
    pub fn truncate(&mut self, capacity: usize) {
        self.items.truncate(capacity);
    }

    /// Remove the entry with `id`, returning whether one was present
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    pub fn items(&self) -> &[ViewedItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ViewedItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> ListState {
        ListState::from_len(self.items.len())
    }

    /// Items in order, minus the entry matching `exclude`
    pub fn without(&self, exclude: Option<&ItemId>) -> Vec<ViewedItem> {
        self.items
            .iter()
            .filter(|item| exclude.map_or(true, |id| &item.id != id))
            .cloned()
            .collect()
    }

    /// Encode as the persisted JSON array of `{id, url, title}` records
    pub fn to_json(&self) -> RecentViewResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Decode persisted state
    ///
    /// The payload comes from client-controlled storage, so every record is
    /// re-normalised: records with unusable links are dropped, duplicates are
    /// collapsed and the length is bounded by `capacity`. A payload that is
    /// not an array of records is an error.
    pub fn from_json(raw: &str, capacity: usize) -> RecentViewResult<Self> {
        let records: Vec<ViewedItem> = serde_json::from_str(raw)?;
        let total = records.len();
        let valid: Vec<ViewedItem> = records
            .into_iter()
            .filter_map(ViewedItem::renormalize)
            .collect();

        if valid.len() != total {
            tracing::debug!(
                dropped = total - valid.len(),
                "Dropped invalid records from persisted list"
            );
        }

        Ok(Self::from_items(valid, capacity))
    }
}
