//! Key-value storage backends
//!
//! A [`KeyValueStore`] is the persistent string map a [`Session`](super::Session)
//! lives in. In the browser that is `window.localStorage`; natively it is either
//! an in-memory map or a JSON file on disk.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::{StoreError, StoreResult};

/// Persistent string storage keyed by string
pub trait KeyValueStore {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Volatile store backed by a hash map
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Store persisted as a flat JSON object in a single file
    ///
    /// The whole map is rewritten on every mutation, through a temporary file
    /// renamed into place. A missing file reads as an empty store.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: Mutex<BTreeMap<String, String>>,
    }

    impl FileStore {
        /// Open (or lazily create) the store at `path`
        pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
            let path = path.into();
            let entries = if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                    path: path.clone(),
                    source,
                })?;
                if content.trim().is_empty() {
                    BTreeMap::new()
                } else {
                    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                        path: path.clone(),
                        error: e.to_string(),
                    })?
                }
            } else {
                BTreeMap::new()
            };

            tracing::debug!(path = ?path, keys = entries.len(), "Opened session file");

            Ok(Self {
                path,
                entries: Mutex::new(entries),
            })
        }

        /// Location of the backing file
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
            let io_err = |source| StoreError::Io {
                path: self.path.clone(),
                source,
            };

            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(io_err)?;
                }
            }

            let json = serde_json::to_string_pretty(entries)?;
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, json).map_err(io_err)?;
            std::fs::rename(&tmp, &self.path).map_err(io_err)?;
            Ok(())
        }

        fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> StoreResult<()> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            f(&mut entries);
            self.persist(&entries)
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.lock().ok()?.get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            self.mutate(|entries| {
                entries.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.mutate(|entries| {
                entries.remove(key);
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tempfile::tempdir;

        #[test]
        fn test_file_store_missing_file_is_empty() {
            let dir = tempdir().unwrap();
            let store = FileStore::open(dir.path().join("session.json")).unwrap();
            assert_eq!(store.get("biz_access"), None);
            assert!(!store.path().exists());
        }

        #[test]
        fn test_file_store_persists_across_opens() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("nested").join("session.json");

            {
                let store = FileStore::open(&path).unwrap();
                store.set("biz_access", "a").unwrap();
                store.set("biz_refresh", "r").unwrap();
                store.remove("biz_refresh").unwrap();
            }

            let reopened = FileStore::open(&path).unwrap();
            assert_eq!(reopened.get("biz_access").as_deref(), Some("a"));
            assert_eq!(reopened.get("biz_refresh"), None);
        }

        #[test]
        fn test_file_store_rejects_corrupt_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("session.json");
            std::fs::write(&path, "not json").unwrap();

            let err = FileStore::open(&path).unwrap_err();
            assert!(matches!(err, StoreError::Corrupt { .. }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("biz_access"), None);

        store.set("biz_access", "token").unwrap();
        assert_eq!(store.get("biz_access").as_deref(), Some("token"));
        assert_eq!(store.len(), 1);

        store.remove("biz_access").unwrap();
        assert!(store.is_empty());

        // removing twice is fine
        store.remove("biz_access").unwrap();
    }
}
