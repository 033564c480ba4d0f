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

//! Tracked content references

use crate::normalize::{normalize_url, strip_html};
use serde::{Deserialize, Serialize};

/// Maximum length of a string identifier
pub const MAX_STRING_ID_LENGTH: usize = 64;

/// Opaque, stable content identifier
///
/// Serialized untagged so that `3` and `"intro-post"` are both valid ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(u64),
    Str(String),
}

impl ItemId {
    /// Parse an identifier from text
    ///
    /// Numeric strings become [`ItemId::Int`], so `"12"` and `12` name the
    /// same item. Empty or oversized strings are rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.chars().count() > MAX_STRING_ID_LENGTH {
            return None;
        }
        if raw.chars().any(|c| c.is_control()) {
            return None;
        }
        match raw.parse::<u64>() {
            Ok(n) => Some(ItemId::Int(n)),
            Err(_) => Some(ItemId::Str(raw.to_string())),
        }
    }

    /// Canonical form of an id, or `None` if it is not storable
    ///
    /// Integers pass through; strings go through [`ItemId::parse`].
    pub fn normalized(self) -> Option<Self> {
        match self {
            ItemId::Int(_) => Some(self),
            ItemId::Str(s) => ItemId::parse(&s),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Int(n)
    }
}

/// Numeric strings convert to [`ItemId::Int`], matching [`ItemId::parse`]
impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        match s.trim().parse::<u64>() {
            Ok(n) => ItemId::Int(n),
            Err(_) => ItemId::Str(s.to_string()),
        }
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        match s.trim().parse::<u64>() {
            Ok(n) => ItemId::Int(n),
            Err(_) => ItemId::Str(s),
        }
    }
}

/// Raw content metadata as supplied by the host or a resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub id: ItemId,
    pub url: String,
    /// May contain markup; stripped when converted to a [`ViewedItem`]
    pub title: String,
}

impl ContentMetadata {
    pub fn new(id: impl Into<ItemId>, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: title.into(),
        }
    }

    /// Normalise into a storable item
    ///
    /// Returns `None` when the link is not an absolute http(s) URL.
    pub fn into_viewed_item(self) -> Option<ViewedItem> {
        ViewedItem::new(self.id, &self.url, &self.title)
    }
}

/// A single tracked content reference
///
/// The url is resolved and the title stripped of markup at write time; stored
/// items are never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewedItem {
    pub id: ItemId,
    pub url: String,
    pub title: String,
}

impl ViewedItem {
    /// Build a normalised item, or `None` if the id or url is unusable
    pub fn new(id: impl Into<ItemId>, url: &str, title: &str) -> Option<Self> {
        let id = id.into().normalized()?;
        let url = normalize_url(url)?;
        Some(Self {
            id,
            url,
            title: strip_html(title),
        })
    }

    /// Re-apply normalisation to an item read back from storage
    ///
    /// Runs the same checks as [`ViewedItem::new`], so an item written by the
    /// engine reads back unchanged.
    pub(crate) fn renormalize(self) -> Option<Self> {
        ViewedItem::new(self.id, &self.url, &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_serde_untagged() {
        let int: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(int, ItemId::Int(42));

        let s: ItemId = serde_json::from_str("\"intro\"").unwrap();
        assert_eq!(s, ItemId::Str("intro".to_string()));

        assert_eq!(serde_json::to_string(&ItemId::Int(7)).unwrap(), "7");
        assert!(serde_json::from_str::<ItemId>("-1").is_err());
        assert!(serde_json::from_str::<ItemId>("1.5").is_err());
        assert!(serde_json::from_str::<ItemId>("null").is_err());
    }

    #[test]
    fn test_item_id_parse() {
        assert_eq!(ItemId::parse("12"), Some(ItemId::Int(12)));
        assert_eq!(ItemId::parse(" about "), Some(ItemId::Str("about".to_string())));
        assert_eq!(ItemId::parse(""), None);
        assert_eq!(ItemId::parse(&"x".repeat(MAX_STRING_ID_LENGTH + 1)), None);
    }

    #[test]
    fn test_viewed_item_normalises_on_write() {
        let item = ViewedItem::new(1u64, " https://example.com/?p=1 ", "<em>Hello</em> there").unwrap();
        assert_eq!(item.url, "https://example.com/?p=1");
        assert_eq!(item.title, "Hello there");

        assert!(ViewedItem::new(1u64, "javascript:alert(1)", "x").is_none());
    }

    #[test]
    fn test_string_ids_share_parse_normalisation() {
        assert_eq!(ItemId::from("12"), ItemId::Int(12));
        assert_eq!(ItemId::from("12".to_string()), ItemId::parse("12").unwrap());
        assert_eq!(ItemId::from("intro"), ItemId::Str("intro".to_string()));
        assert_eq!(ItemId::from(" about ").normalized(), ItemId::parse("about"));
    }

    #[test]
    fn test_viewed_item_rejects_unstorable_ids() {
        let long = "x".repeat(MAX_STRING_ID_LENGTH + 16);
        assert!(ViewedItem::new(long.as_str(), "https://example.com/a", "A").is_none());
        assert!(ViewedItem::new("", "https://example.com/a", "A").is_none());

        let at_limit = "x".repeat(MAX_STRING_ID_LENGTH);
        let item = ViewedItem::new(at_limit.as_str(), "https://example.com/a", "A").unwrap();
        assert_eq!(item.clone().renormalize(), Some(item));
    }

    #[test]
    fn test_metadata_conversion() {
        let meta = ContentMetadata::new("guide", "https://example.com/guide", "<b>Guide</b>");
        let item = meta.into_viewed_item().unwrap();
        assert_eq!(item.id, ItemId::Str("guide".to_string()));
        assert_eq!(item.title, "Guide");
    }
}
