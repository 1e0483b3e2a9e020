//! Guardian Local Store
//!
//! Small, user-editable state blobs that survive across sessions on one
//! device. No sync, no merge, no versioning.
//!
//! - **memory**: ephemeral backend, used by tests and throwaway sessions
//! - **file**: one file per key under a data directory
//! - **sqlite**: single `kv` table
//! - **persisted**: typed read-on-init / write-on-change cell over any backend
//! - **error**: error types
//!
//! # Contract
//!
//! ```text
//! Read:   get(key) → Some(blob) → parse → value
//!                  → None / parse error → built-in default (logged)
//!
//! Write:  mutate in memory → serialize whole value → put(key, blob)
//! ```
//!
//! # Example
//!
//! ```rust
//! use guardian::store::{MemoryStore, Persisted};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut flag = Persisted::load(store.clone(), "sound_enabled", || false);
//! assert!(!*flag.get());
//!
//! flag.set(true).unwrap();
//! let reloaded = Persisted::load(store, "sound_enabled", || false);
//! assert!(*reloaded.get());
//! ```

pub mod error;
pub mod file;
pub mod memory;
pub mod persisted;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persisted::Persisted;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};

/// Opaque serialized value stored under a single key
pub type Blob = String;

/// Key for the one-time setup flag
pub const ONBOARDING_KEY: &str = "has_onboarded";
/// Key for the medication schedule
pub const MEDICATION_KEY: &str = "medication_schedule";
/// Key for the advisory device limits
pub const DEVICE_LIMITS_KEY: &str = "device_limits";

/// Whole-value key-value persistence
///
/// Every read returns the complete blob last written under the key; every
/// write replaces it.
pub trait PersistentStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> StoreResult<Option<Blob>>;

    /// Replace the blob stored under `key`
    fn put(&self, key: &str, blob: Blob) -> StoreResult<()>;

    /// Short backend name for logs and status output
    fn backend_name(&self) -> &'static str;
}

/// Reject keys that could escape a directory or a table row
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Open the backend selected by configuration
pub fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn PersistentStore>> {
    let data_dir = config.data_path();

    let store: Arc<dyn PersistentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => Arc::new(FileStore::open(&data_dir)?),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(data_dir.join("guardian.db"))?),
    };

    tracing::info!(
        backend = store.backend_name(),
        data_dir = %data_dir.display(),
        "Opened local store"
    );

    Ok(store)
}
