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
//! Adapter contract tests shared by every store

use recentview_storage::{
    DisabledStore, FileStore, InMemoryStore, ManualClock, StorageAdapter, StorageError,
    StorageKeys,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn check_contract(store: &dyn StorageAdapter, clock: &ManualClock) {
    let keys = StorageKeys::default();

    assert_eq!(store.read(&keys.current).unwrap(), None);

    store
        .write(&keys.current, "[]", Duration::from_secs(30))
        .unwrap();
    store
        .write(&keys.legacy, "[1,2]", Duration::from_secs(300))
        .unwrap();
    assert_eq!(store.read(&keys.current).unwrap().as_deref(), Some("[]"));

    // Keys expire independently
    clock.advance(Duration::from_secs(31));
    assert_eq!(store.read(&keys.current).unwrap(), None);
    assert_eq!(store.read(&keys.legacy).unwrap().as_deref(), Some("[1,2]"));

    store.clear(&keys.legacy).unwrap();
    assert_eq!(store.read(&keys.legacy).unwrap(), None);
    store.clear(&keys.legacy).unwrap();
}

/// Test the in-memory store against the contract
#[test]
fn test_in_memory_contract() {
    let clock = Arc::new(ManualClock::default());
    let store = InMemoryStore::with_clock(clock.clone());
    check_contract(&store, &clock);
}

/// Test the file store against the contract
#[test]
fn test_file_store_contract() {
    let temp_dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::default());
    let store = FileStore::open_with_clock(temp_dir.path(), clock.clone()).unwrap();
    check_contract(&store, &clock);
}

/// Test that shared handles behave like the store they wrap
#[test]
fn test_shared_handle_contract() {
    let clock = Arc::new(ManualClock::default());
    let store: Arc<dyn StorageAdapter> = Arc::new(InMemoryStore::with_clock(clock.clone()));
    check_contract(&store, &clock);
}

/// Test that a disabled store reports unavailability for every call
#[test]
fn test_disabled_store_contract() {
    let store: Box<dyn StorageAdapter> = Box::new(DisabledStore::new());
    assert!(matches!(
        store.read("recently_viewed"),
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        store.write("recently_viewed", "[]", Duration::from_secs(1)),
        Err(StorageError::Unavailable(_))
    ));
}
