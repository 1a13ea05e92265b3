//! JSON file backed key-value storage.
//!
//! The file is a single JSON object mapping storage keys to their
//! serialized values, e.g. `{"cart": "[...]", "wishlist": "[1,3]"}`.
//! Values stay strings so the file holds exactly what the storefront keeps
//! in a visitor's session.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lantern_core::KeyValueStore;
use thiserror::Error;

/// Errors reading or writing the storage file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a storage file: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Storage entries loaded from a JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// Open the storage file. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Storage opened");
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Write the entries back if anything changed.
    ///
    /// Writes to a sibling temporary file first and renames it over the
    /// target, so the file is never left half written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let write_error = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| write_error(e.into()))?;
        let temp = temp_path(&self.path);
        tokio::fs::write(&temp, json).await.map_err(write_error)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(write_error)?;

        tracing::debug!(path = %self.path.display(), "Storage saved");
        self.dirty = false;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
        self.dirty = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lantern_core::storage::{CART_KEY, WISHLIST_KEY};

    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("lantern-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let store = FileStore::open(scratch_path()).await.unwrap();
        assert!(store.get_item(CART_KEY).is_none());
    }

    #[tokio::test]
    async fn test_flush_round_trips_entries() {
        let path = scratch_path();

        let mut store = FileStore::open(&path).await.unwrap();
        store.set_item(WISHLIST_KEY, "[1,3]".to_string());
        store.flush().await.unwrap();
        assert!(!temp_path(&path).exists());

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_item(WISHLIST_KEY).as_deref(), Some("[1,3]"));

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }

    #[tokio::test]
    async fn test_clean_store_does_not_create_file() {
        let path = scratch_path();
        let mut store = FileStore::open(&path).await.unwrap();
        store.flush().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_rejects_non_object_file() {
        let path = scratch_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "[1, 2]").await.unwrap();

        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }
}
