use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::errors::{LedgerError, Result};

use super::KeyValueStore;

#[derive(Debug, Default)]
struct Inner {
    values: BTreeMap<String, String>,
    writes: usize,
}

/// In-process persistence surface. Clones share the same map, so a caller can
/// keep a handle to inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write batches applied so far.
    pub fn write_count(&self) -> usize {
        self.read().map(|inner| inner.writes).unwrap_or_default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.read()
            .map(|inner| inner.values.clone())
            .unwrap_or_default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.values.get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut inner = self.write()?;
        for (key, value) in entries {
            inner.values.insert(key.to_string(), value.clone());
        }
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.write()?;
        if inner.values.remove(key).is_some() {
            inner.writes += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_values() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("currency", "\"€\"").unwrap();
        assert_eq!(handle.get("currency").unwrap().as_deref(), Some("\"€\""));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn removing_missing_key_is_not_a_write() {
        let store = MemoryStore::new();
        store.remove("transactions").unwrap();
        assert_eq!(store.write_count(), 0);
        assert!(store.snapshot().is_empty());
    }
}
