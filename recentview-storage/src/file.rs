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

//! File-backed store
//!
//! One JSON envelope per key inside a data directory:
//!
//! ```json
//! {"value": "<opaque payload>", "expires_at": "2026-01-01T00:00:00Z"}
//! ```
//!
//! Writes go to a uniquely named temporary file that is then renamed over the
//! target, so a reader never sees a half-written envelope and concurrent
//! writers do not collide. Unreadable envelopes read as absent.

use crate::adapter::StorageAdapter;
use crate::clock::{add_ttl, Clock, SystemClock};
use crate::error::StorageResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use tempfile::NamedTempFile;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const ENVELOPE_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Directory-backed [`StorageAdapter`]
pub struct FileStore {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
    default_ttl: Option<Duration>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with_clock(dir, Arc::new(SystemClock))
    }

    pub fn open_with_clock(dir: impl AsRef<Path>, clock: Arc<dyn Clock>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            clock,
            default_ttl: None,
        })
    }

    /// Set the expiry used for `expiration_seconds = 0`
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", file_stem(key), ENVELOPE_EXTENSION))
    }

    /// Delete every expired envelope, returning how many were removed
    pub fn purge_expired(&self) -> StorageResult<usize> {
        let now = self.clock.now();
        let mut removed = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == ENVELOPE_EXTENSION).unwrap_or(false) {
                let expired = match std::fs::read_to_string(&path) {
                    Ok(content) => serde_json::from_str::<Envelope>(&content)
                        .map(|env| env.expires_at <= now)
                        .unwrap_or(true),
                    Err(_) => false,
                };
                if expired {
                    remove_if_exists(&path)?;
                    removed += 1;
                }
            }
        }

        Ok(removed)
    }
}

/// Map a key to a safe, unique file stem
///
/// `[A-Za-z0-9_-]` is kept and every other byte becomes `%XX`, so distinct
/// keys never share a file and no key can escape the data directory. The
/// empty key maps to a lone `%`, which no encoded key can produce.
fn file_stem(key: &str) -> String {
    if key.is_empty() {
        return "%".to_string();
    }

    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push('%');
            stem.push_str(&hex::encode_upper([byte]));
        }
    }
    stem
}

fn remove_if_exists(path: &Path) -> StorageResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

impl StorageAdapter for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = match serde_json::from_str(&content) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(key, error = %e, "Corrupt storage envelope, treating as absent");
                return Ok(None);
            }
        };

        if envelope.expires_at <= self.clock.now() {
            remove_if_exists(&path)?;
            return Ok(None);
        }

        Ok(Some(envelope.value))
    }

    fn write(&self, key: &str, value: &str, ttl: Duration) -> StorageResult<()> {
        let envelope = Envelope {
            value: value.to_string(),
            expires_at: add_ttl(self.clock.now(), ttl),
        };
        let content = serde_json::to_string(&envelope)?;

        // Each writer gets its own temp file; the rename is last-write-wins
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;

        Ok(())
    }

    fn clear(&self, key: &str) -> StorageResult<()> {
        remove_if_exists(&self.path_for(key))
    }

    fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use tempfile::TempDir;

    #[test]
    fn test_file_stem_sanitises() {
        assert_eq!(file_stem("recently_viewed"), "recently_viewed");
        assert_eq!(file_stem("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(file_stem("a%2E"), "a%252E");
        assert_eq!(file_stem(""), "%");
    }

    #[test]
    fn test_similar_keys_do_not_collide() {
        let keys = ["a.b", "a_b", "a/b", "a%2Eb", "", "_", "%"];
        let stems: std::collections::HashSet<String> = keys.iter().map(|k| file_stem(k)).collect();
        assert_eq!(stems.len(), keys.len());

        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        for key in keys {
            store.write(key, key, Duration::from_secs(60)).unwrap();
        }
        for key in keys {
            assert_eq!(store.read(key).unwrap().as_deref(), Some(key));
        }
    }

    #[test]
    fn test_concurrent_writers() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        store
                            .write("shared", &n.to_string(), Duration::from_secs(60))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let value = store.read("shared").unwrap().unwrap();
        assert!(value.parse::<u32>().unwrap() < 8);
        // Only the envelope is left behind
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_round_trip_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        store.write("k", "[1,2]", Duration::from_secs(60)).unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("[1,2]"));

        store.clear("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
        store.clear("k").unwrap();
    }

    #[test]
    fn test_expiry() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::default());
        let store = FileStore::open_with_clock(temp_dir.path(), clock.clone()).unwrap();

        store.write("k", "v", Duration::from_secs(10)).unwrap();
        clock.advance(Duration::from_secs(10));
        assert_eq!(store.read("k").unwrap(), None);
        assert!(!temp_dir.path().join("k.json").exists());
    }

    #[test]
    fn test_corrupt_envelope_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("k.json"), "not json").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_purge_expired() {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(ManualClock::default());
        let store = FileStore::open_with_clock(temp_dir.path(), clock.clone()).unwrap();

        store.write("a", "v", Duration::from_secs(5)).unwrap();
        store.write("b", "v", Duration::from_secs(500)).unwrap();
        clock.advance(Duration::from_secs(6));

        assert_eq!(store.purge_expired().unwrap(), 1);
        assert!(store.read("b").unwrap().is_some());
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp_dir.path()).unwrap();
            store.write("k", "persisted", Duration::from_secs(3600)).unwrap();
        }
        let store = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("persisted"));
    }
}
