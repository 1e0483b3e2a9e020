//! Typed persisted cell
//!
//! Holds one record in memory and mirrors it into a [`PersistentStore`] on
//! every change. Reads happen once, on construction.

use super::{PersistentStore, StoreResult};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;

/// Where the initial value of a [`Persisted`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from the stored blob
    Stored,
    /// Nothing stored under the key
    Default,
    /// A blob existed but could not be read or parsed
    Recovered,
}

/// A record read on init and written whole on change
pub struct Persisted<T> {
    store: Arc<dyn PersistentStore>,
    key: String,
    value: T,
    origin: LoadOrigin,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read `key` from the store, falling back to `default` when the blob is
    /// absent, unreadable or malformed. Failures are logged, never returned.
    pub fn load(
        store: Arc<dyn PersistentStore>,
        key: impl Into<String>,
        default: impl FnOnce() -> T,
    ) -> Self {
        let key = key.into();

        let (value, origin) = match store.get(&key) {
            Ok(Some(blob)) => match serde_json::from_str::<T>(&blob) {
                Ok(value) => (value, LoadOrigin::Stored),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Stored blob is malformed, using default");
                    (default(), LoadOrigin::Recovered)
                }
            },
            Ok(None) => (default(), LoadOrigin::Default),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read stored blob, using default");
                (default(), LoadOrigin::Recovered)
            }
        };

        tracing::debug!(key = %key, ?origin, "Loaded persisted record");

        Self {
            store,
            key,
            value,
            origin,
        }
    }

    /// Current in-memory value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store key this record lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Where the initial value came from
    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Replace the whole value and write it through.
    ///
    /// The in-memory value keeps the change even when the write fails.
    pub fn set(&mut self, value: T) -> StoreResult<()> {
        self.value = value;
        self.flush()
    }

    /// Mutate in place and write the whole value through
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> StoreResult<R> {
        let result = f(&mut self.value);
        self.flush()?;
        Ok(result)
    }

    /// Serialize the current value and overwrite the stored blob
    pub fn flush(&self) -> StoreResult<()> {
        let blob = serde_json::to_string(&self.value)?;
        self.store.put(&self.key, blob)
    }
}

impl<T: fmt::Debug> fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("origin", &self.origin)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore, StoreError};
    use std::collections::BTreeMap;

    fn memory() -> Arc<dyn PersistentStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_absent_uses_default() {
        let cell = Persisted::load(memory(), "counts", || vec![1u32, 2, 3]);
        assert_eq!(cell.get(), &vec![1, 2, 3]);
        assert_eq!(cell.origin(), LoadOrigin::Default);
    }

    #[test]
    fn test_set_then_fresh_load_is_equal() {
        let store = memory();
        let mut written = BTreeMap::new();
        written.insert("gaming".to_string(), 3.5f64);
        written.insert("social".to_string(), 0.75);

        let mut cell = Persisted::load(store.clone(), "device_limits", BTreeMap::new);
        cell.set(written.clone()).unwrap();

        let fresh: Persisted<BTreeMap<String, f64>> =
            Persisted::load(store, "device_limits", BTreeMap::new);
        assert_eq!(fresh.get(), &written);
        assert_eq!(fresh.origin(), LoadOrigin::Stored);
    }

    #[test]
    fn test_malformed_blob_falls_back() {
        let store: Arc<dyn PersistentStore> =
            Arc::new(MemoryStore::with_entries([("medication_schedule", "[{oops")]));

        let cell: Persisted<Vec<u32>> = Persisted::load(store, "medication_schedule", Vec::new);
        assert!(cell.get().is_empty());
        assert_eq!(cell.origin(), LoadOrigin::Recovered);
    }

    #[test]
    fn test_update_writes_whole_value() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let mut cell = Persisted::load(store.clone(), "names", || vec!["a".to_string()]);

        let len = cell.update(|v| {
            v.push("b".to_string());
            v.len()
        })
        .unwrap();
        assert_eq!(len, 2);

        assert_eq!(
            store.get("names").unwrap().as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    struct FailingStore;

    impl PersistentStore for FailingStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Lock("unavailable".to_string()))
        }

        fn put(&self, _key: &str, _blob: String) -> StoreResult<()> {
            Err(StoreError::Lock("unavailable".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_read_error_recovers_and_write_error_propagates() {
        let mut cell = Persisted::load(Arc::new(FailingStore), "has_onboarded", || false);
        assert_eq!(cell.origin(), LoadOrigin::Recovered);
        assert!(!*cell.get());

        assert!(cell.set(true).is_err());
        assert!(*cell.get());
    }
}
