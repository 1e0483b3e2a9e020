//! File store backend
//!
//! One `<key>.json` file per key inside the data directory. Writes go to a
//! temporary sibling first and are renamed over the target, so a crash
//! mid-write leaves the previous blob intact.

use super::{validate_key, Blob, PersistentStore, StoreResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory-backed store
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Blob>> {
        validate_key(key)?;

        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, blob: Blob) -> StoreResult<()> {
        validate_key(key)?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(blob.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &target)?;

        tracing::debug!(key, path = ?target, bytes = blob.len(), "Wrote blob");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_across_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .put("device_limits", r#"{"gaming":3.5,"social":1}"#.to_string())
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("device_limits").unwrap().as_deref(),
            Some(r#"{"gaming":3.5,"social":1}"#)
        );
    }

    #[test]
    fn test_absent_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("medication_schedule").unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.put("has_onboarded", "true".to_string()).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["has_onboarded.json".to_string()]);
    }

    #[test]
    fn test_traversal_key_rejected() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.put("../escape", "x".to_string()).is_err());
        assert!(store.get("../escape").is_err());
    }
}
