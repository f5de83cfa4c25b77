// crates/atlas-core/src/store.rs

//! Local key/value persistence.
//!
//! The favorites are the only persisted state. They go through
//! [`KeyValueStore`] so the same store logic runs over a JSON file on native
//! targets, over `localStorage` in the browser, and in memory in tests.

use crate::error::StoreError;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// String key → string value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Non-persistent store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with a corrupted value.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object file: `{ "favorites": "[\"DEU\"]" }`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// `<data dir>/store.json` for the current user.
    #[cfg(feature = "native")]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("rs", "atlas", "atlas")
            .map(|dirs| dirs.data_dir().join("store.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Rewrites the whole file through a temporary sibling so a crash never
    /// leaves half a file behind.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Only a corrupted file is replaced; unreadable files are left alone.
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Corrupted(e)) => {
                warn!(path = %self.path.display(), error = %e, "store file corrupted, replacing it");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/store.json"));
        assert_eq!(store.get("favorites").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/store.json");

        let mut first = FileStore::new(&path);
        first.set("favorites", r#"["DEU"]"#).unwrap();
        first.set("other", "x").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(second.get("favorites").unwrap().as_deref(), Some(r#"["DEU"]"#));
        assert_eq!(second.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_reports_and_replaces_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get("favorites"), Err(StoreError::Corrupted(_))));

        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_does_not_overwrite_an_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::create_dir(&path).unwrap();

        let mut store = FileStore::new(&path);
        let err = store.set("favorites", "[]").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(path.is_dir());
    }
}
