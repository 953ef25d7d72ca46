//! Memory Store Module
//!
//! HashMap storage behind a single reader/writer lock, with expiration
//! evaluated lazily on access.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{Entry, Storage};

// == Memory Store ==
/// In-memory store with lazy TTL expiration.
///
/// Reads share the lock; writes, including the removal of an expired key
/// discovered by `get`, take it exclusively. Nothing runs in the background:
/// an expired entry stays resident until `get` or `delete` touches its key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    // == Lazy Removal ==
    /// Removes `key` if it is still expired once the exclusive lock is held.
    ///
    /// Another writer may have replaced or removed the key between the read
    /// and write locks, so expiry is checked again; a missing key is a no-op.
    /// A poisoned lock is left alone: the entry stays resident.
    fn remove_if_expired(&self, key: &str) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };
        let still_expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(Instant::now()));

        if still_expired {
            entries.remove(key);
            debug!(key, "removed expired entry");
        }
    }

    // == Length ==
    /// Returns the number of physically resident entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStore {
    // == Get ==
    /// An empty key can never be stored, so it is simply reported absent.
    ///
    /// A poisoned lock is recovered for the lookup only; lazy removal is
    /// skipped so a poisoned map is never written. Reads never leave
    /// the map half-modified.
    fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        self.remove_if_expired(key);
        None
    }

    // == Set ==
    fn set(&self, key: &str, value: &str, ttl_seconds: Option<i64>) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }

        let entry = Entry::new(value.to_string(), ttl_seconds);
        self.write()?.insert(key.to_string(), entry);

        Ok(())
    }

    // == Delete ==
    /// Reports physical presence: an expired entry that has not been cleaned
    /// up yet still counts as existing.
    fn delete(&self, key: &str) -> Result<bool> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }

        Ok(self.write()?.remove(key).is_some())
    }

    // == List ==
    /// Scans under one read lock and skips expired entries without removing them.
    fn list(&self, limit: i64) -> Result<HashMap<String, String>> {
        if limit < 0 {
            return Err(StoreError::InvalidArgument(
                "limit cannot be negative".to_string(),
            ));
        }

        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let entries = self.read()?;
        let now = Instant::now();

        Ok(entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .take(limit)
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread::{self, sleep};
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", "value1", None).unwrap();

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_values_of_any_shape() {
        let store = MemoryStore::new();
        let cases = [
            ("simple", "value1"),
            ("with spaces", "value with spaces"),
            ("empty", ""),
            ("unicode", "こんにちは"),
            ("numbers", "12345"),
        ];

        for (key, value) in cases {
            store.set(key, value, None).unwrap();
        }
        for (key, value) in cases {
            assert_eq!(store.get(key).as_deref(), Some(value), "key {}", key);
        }
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_get_empty_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get(""), None);
    }

    #[test]
    fn test_store_set_empty_key() {
        let store = MemoryStore::new();

        assert_eq!(store.set("", "value", None), Err(StoreError::InvalidKey));
        assert_eq!(store.set("", "", Some(10)), Err(StoreError::InvalidKey));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_delete() {
        let store = MemoryStore::new();

        store.set("key1", "value1", None).unwrap();

        assert_eq!(store.delete("key1"), Ok(true));
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.delete("nonexistent"), Ok(false));
    }

    #[test]
    fn test_store_delete_twice() {
        let store = MemoryStore::new();

        store.set("key1", "value1", None).unwrap();

        assert_eq!(store.delete("key1"), Ok(true));
        assert_eq!(store.delete("key1"), Ok(false));
    }

    #[test]
    fn test_store_delete_empty_key() {
        let store = MemoryStore::new();
        assert_eq!(store.delete(""), Err(StoreError::InvalidKey));
    }

    #[test]
    fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key1", "value1", None).unwrap();
        store.set("key1", "value2", None).unwrap();

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_clears_ttl() {
        let store = MemoryStore::new();

        store.set("key1", "value1", Some(1)).unwrap();
        store.set("key1", "value2", None).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("key1"), Some("value2".to_string()));
    }

    #[test]
    fn test_store_zero_and_negative_ttl_persist() {
        let store = MemoryStore::new();

        store.set("zero_ttl", "value", Some(0)).unwrap();
        store.set("negative_ttl", "value", Some(-5)).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("zero_ttl"), Some("value".to_string()));
        assert_eq!(store.get("negative_ttl"), Some("value".to_string()));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let store = MemoryStore::new();

        store.set("key1", "value1", Some(1)).unwrap();
        assert_eq!(store.get("key1"), Some("value1".to_string()));

        sleep(Duration::from_millis(1100));

        // Still resident until something touches it
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_delete_expired_reports_existed() {
        let store = MemoryStore::new();

        store.set("key1", "value1", Some(1)).unwrap();
        sleep(Duration::from_millis(1100));

        assert_eq!(store.delete("key1"), Ok(true));
        assert_eq!(store.delete("key1"), Ok(false));
    }

    #[test]
    fn test_store_delete_ttl_key() {
        let store = MemoryStore::new();

        store.set("ttl_key", "value", Some(60)).unwrap();

        assert_eq!(store.delete("ttl_key"), Ok(true));
        assert_eq!(store.get("ttl_key"), None);
    }

    #[test]
    fn test_store_list() {
        let store = MemoryStore::new();

        assert!(store.list(10).unwrap().is_empty());

        store.set("key1", "value1", None).unwrap();
        store.set("key2", "value2", None).unwrap();
        store.set("key3", "value3", None).unwrap();

        let listed = store.list(10).unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed["key1"], "value1");
        assert_eq!(listed["key2"], "value2");
        assert_eq!(listed["key3"], "value3");
    }

    #[test]
    fn test_store_list_limit() {
        let store = MemoryStore::new();

        store.set("key1", "value1", None).unwrap();
        store.set("key2", "value2", None).unwrap();
        store.set("key3", "value3", None).unwrap();

        let listed = store.list(2).unwrap();
        assert_eq!(listed.len(), 2);
        for (key, value) in &listed {
            assert_eq!(store.get(key).as_ref(), Some(value));
        }

        assert!(store.list(0).unwrap().is_empty());
    }

    #[test]
    fn test_store_list_negative_limit() {
        let store = MemoryStore::new();

        let result = store.list(-1);
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_store_list_skips_expired_without_removing() {
        let store = MemoryStore::new();

        store.set("persistent", "value1", None).unwrap();
        store.set("short_ttl", "value2", Some(1)).unwrap();

        assert_eq!(store.list(10).unwrap().len(), 2);

        sleep(Duration::from_millis(1100));

        let listed = store.list(10).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed["persistent"], "value1");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_list_limit_counts_only_live_entries() {
        let store = MemoryStore::new();

        for i in 0..5 {
            store.set(&format!("expiring{}", i), "gone", Some(1)).unwrap();
        }
        store.set("live1", "a", None).unwrap();
        store.set("live2", "b", None).unwrap();

        sleep(Duration::from_millis(1100));

        let listed = store.list(2).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed["live1"], "a");
        assert_eq!(listed["live2"], "b");
    }

    #[test]
    fn test_concurrent_expired_get_removes_once() {
        let store = Arc::new(MemoryStore::new());
        store.set("key", "value", Some(1)).unwrap();

        sleep(Duration::from_millis(1100));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.get("key"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), None);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_disjoint_writes_then_reads() {
        let store = Arc::new(MemoryStore::new());
        let workers = 16;
        let per_worker = 200;

        thread::scope(|scope| {
            for w in 0..workers {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..per_worker {
                        let key = format!("w{}-k{}", w, i);
                        let value = format!("{}-{}", key, "x".repeat(64));
                        store.set(&key, &value, None).unwrap();
                    }
                });
            }
        });

        assert_eq!(store.len(), workers * per_worker);

        thread::scope(|scope| {
            for w in 0..workers {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..per_worker {
                        let key = format!("w{}-k{}", w, i);
                        let expected = format!("{}-{}", key, "x".repeat(64));
                        assert_eq!(store.get(&key), Some(expected));
                    }
                });
            }
        });
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let store = Arc::new(MemoryStore::new());
        store.set("key", "value", None).unwrap();
        store.set("expiring", "gone", Some(1)).unwrap();

        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the store lock");
        })
        .join();

        assert!(matches!(store.set("k", "v", None), Err(StoreError::Internal(_))));
        assert!(matches!(store.delete("key"), Err(StoreError::Internal(_))));
        assert!(matches!(store.list(10), Err(StoreError::Internal(_))));

        // Reads carry on serving what is there
        assert_eq!(store.get("key"), Some("value".to_string()));

        // An expired key reads as absent but is not removed through the poisoned lock
        sleep(Duration::from_millis(1100));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("expiring"), None);
        assert_eq!(store.len(), 2);
    }
}
