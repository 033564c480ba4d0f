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
//! Strict decoder for the legacy id-list format
//!
//! Older installs persisted a JSON array of bare content ids under
//! [`LEGACY_KEY`](recentview_storage::LEGACY_KEY). The payload lives in
//! client-controlled storage, so it is decoded against an allow-list:
//!
//! - the payload is a JSON array of at most [`MAX_LEGACY_IDS`] elements and
//!   at most [`MAX_LEGACY_PAYLOAD_BYTES`] bytes
//! - each element is a non-negative integer or a non-empty string id
//!
//! Any other shape rejects the whole payload.

use recentview_core::{ItemId, RecentViewError, RecentViewResult};
use serde_json::Value;
use std::collections::HashSet;

/// Largest legacy payload accepted, in bytes
pub const MAX_LEGACY_PAYLOAD_BYTES: usize = 4096;

/// Most ids accepted from one legacy payload
pub const MAX_LEGACY_IDS: usize = 256;

/// A validated legacy id list, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyPayload {
    ids: Vec<ItemId>,
}

impl LegacyPayload {
    /// Decode and validate a raw legacy payload
    pub fn decode(raw: &str) -> RecentViewResult<Self> {
        if raw.len() > MAX_LEGACY_PAYLOAD_BYTES {
            return Err(RecentViewError::MalformedLegacyPayload(format!(
                "payload is {} bytes, limit is {}",
                raw.len(),
                MAX_LEGACY_PAYLOAD_BYTES
            )));
        }

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| RecentViewError::MalformedLegacyPayload(e.to_string()))?;

        let elements = match value {
            Value::Array(elements) => elements,
            other => {
                return Err(RecentViewError::MalformedLegacyPayload(format!(
                    "expected an array, found {}",
                    kind_of(&other)
                )))
            }
        };

        if elements.len() > MAX_LEGACY_IDS {
            return Err(RecentViewError::MalformedLegacyPayload(format!(
                "{} ids, limit is {}",
                elements.len(),
                MAX_LEGACY_IDS
            )));
        }

        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let id = decode_id(element).ok_or_else(|| {
                RecentViewError::MalformedLegacyPayload(format!(
                    "element {} is not a valid id ({})",
                    index,
                    kind_of(element)
                ))
            })?;
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }

        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<ItemId> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn decode_id(element: &Value) -> Option<ItemId> {
    match element {
        Value::Number(n) => n.as_u64().map(ItemId::Int),
        Value::String(s) => ItemId::parse(s),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_u64() => "integer",
        Value::Number(_) => "non-integer number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
