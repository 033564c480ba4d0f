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
//! Content lookup used when migrating legacy ids

use recentview_core::{ContentMetadata, ItemId};
use std::collections::HashMap;

/// Maps an id to live content metadata
///
/// Returning `None` means the content is gone (deleted, unpublished) and the
/// id is dropped from migrated lists.
pub trait ContentResolver {
    fn resolve(&self, id: &ItemId) -> Option<ContentMetadata>;
}

impl<F> ContentResolver for F
where
    F: Fn(&ItemId) -> Option<ContentMetadata>,
{
    fn resolve(&self, id: &ItemId) -> Option<ContentMetadata> {
        self(id)
    }
}

impl ContentResolver for HashMap<ItemId, ContentMetadata> {
    fn resolve(&self, id: &ItemId) -> Option<ContentMetadata> {
        self.get(id).cloned()
    }
}

/// Resolver that knows no content; every legacy id is dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl ContentResolver for NoopResolver {
    fn resolve(&self, _id: &ItemId) -> Option<ContentMetadata> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_resolver() {
        let resolver = |id: &ItemId| match id {
            ItemId::Int(n) if *n < 10 => Some(ContentMetadata::new(
                *n,
                format!("https://example.com/?p={}", n),
                format!("Post {}", n),
            )),
            _ => None,
        };
        assert!(resolver.resolve(&ItemId::Int(3)).is_some());
        assert!(resolver.resolve(&ItemId::Int(30)).is_none());
    }

    #[test]
    fn test_map_resolver() {
        let mut map = HashMap::new();
        map.insert(
            ItemId::from("intro"),
            ContentMetadata::new("intro", "https://example.com/intro", "Intro"),
        );
        assert_eq!(
            map.resolve(&ItemId::from("intro")).map(|m| m.title),
            Some("Intro".to_string())
        );
        assert!(NoopResolver.resolve(&ItemId::from("intro")).is_none());
    }
}
