//! In-memory store backend

use super::{validate_key, Blob, PersistentStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// Store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Blob>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with blobs, e.g. to simulate a returning session
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Blob>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of keys written so far
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Blob>> {
        validate_key(key)?;
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, blob: Blob) -> StoreResult<()> {
        validate_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), blob);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("k", "first".to_string()).unwrap();
        store.put("k", "second".to_string()).unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_entries() {
        let store = MemoryStore::with_entries([("has_onboarded", "true")]);
        assert_eq!(store.get("has_onboarded").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let store = MemoryStore::new();
        let err = store.put("bad key", "x".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
