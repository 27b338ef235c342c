//! Process-local adapter backed by a `HashMap`.
//!
//! Used for ephemeral sessions and tests. `set_failing(true)` makes every
//! call fail with `StorageError::Unavailable`, which lets callers exercise
//! their persistence-failure paths.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one key, bypassing failure injection.
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.into(), value.into());
        }
        self
    }

    /// Toggles failure injection for all subsequent calls.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self) -> StorageResult<MutexGuard<'_, HashMap<String, String>>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory store is set to fail".to_string(),
            ));
        }
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.guard()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.guard()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::storage::{KeyValueStore, StorageError};

    #[test]
    fn set_get_cycle() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get_item("k").unwrap(), None);

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn failure_injection_affects_reads_and_writes() {
        let store = MemoryKeyValueStore::new().with_item("k", "v");
        store.set_failing(true);
        assert!(matches!(
            store.get_item("k"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.set_item("k", "x").is_err());

        store.set_failing(false);
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
