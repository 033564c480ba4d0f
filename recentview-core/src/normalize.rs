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

//! Write-time normalisation of titles and links
//!
//! Titles are stored as plain text and links as absolute http(s) URLs. Both
//! are normalised when an item is written and again when persisted state is
//! loaded, since that state lives in client-controlled storage. Normalising
//! an already normalised value is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum stored title length in characters
pub const MAX_TITLE_LENGTH: usize = 512;

/// Maximum stored URL length in bytes
pub const MAX_URL_LENGTH: usize = 2048;

static SCRIPT_STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").expect("valid regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip HTML from a display title
///
/// Decodes the basic entities (repeatedly, so double-encoded markup is
/// exposed too), then removes `<script>`/`<style>` blocks together with their
/// content, drops all remaining tags, collapses whitespace and caps the length
/// at [`MAX_TITLE_LENGTH`] characters.
///
/// The output contains no tags, entities or control characters, so stripping
/// it again returns it unchanged.
pub fn strip_html(input: &str) -> String {
    let printable: String = input
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let decoded = decode_entities(printable);
    let without_blocks = SCRIPT_STYLE_BLOCK.replace_all(&decoded, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let collapsed = WHITESPACE.replace_all(&without_tags, " ");

    let capped: String = collapsed.trim().chars().take(MAX_TITLE_LENGTH).collect();
    capped.trim_end().to_string()
}

/// Decode entities until nothing changes
///
/// Each pass that changes the text also shortens it, so this terminates.
fn decode_entities(mut text: String) -> String {
    loop {
        let next = decode_entities_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn decode_entities_once(input: &str) -> String {
    input
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Validate a resolved link
///
/// Returns the trimmed URL when it is an absolute `http` or `https` link of
/// reasonable length without whitespace or control characters, `None`
/// otherwise. Relative links and other schemes (`javascript:`, `data:`) are
/// rejected.
pub fn normalize_url(input: &str) -> Option<String> {
    let url = input.trim();

    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        return None;
    }

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }

    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))?;

    // Host part must not be empty
    if rest.is_empty() || rest.starts_with('/') {
        return None;
    }

    Some(url.to_string())
}
