//! Persistent key-value storage backends.
//!
//! The theme store only needs two operations: read an integer with a
//! fallback, and write an integer durably. Both backends here implement
//! that contract; the in-memory one backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file exists but is not a valid store document
    #[error("storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Integer key-value storage grouped by namespace.
pub trait KeyValueStore {
    /// Returns the stored value, or `default` when the key is absent.
    fn get_int(&mut self, namespace: &str, key: &str, default: i32) -> Result<i32, StorageError>;

    /// Stores `value`; it is durable once this returns `Ok`.
    fn put_int(&mut self, namespace: &str, key: &str, value: i32) -> Result<(), StorageError>;
}

/// `{namespace: {key: value}}`
type Document = BTreeMap<String, BTreeMap<String, i32>>;

fn lookup(doc: &Document, namespace: &str, key: &str) -> Option<i32> {
    doc.get(namespace).and_then(|entries| entries.get(key)).copied()
}

/// In-memory store. Clones share the same data, which lets tests simulate
/// a reboot by building a fresh theme store over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for a key without applying a default.
    pub fn peek(&self, namespace: &str, key: &str) -> Option<i32> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        lookup(&data, namespace, key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&mut self, namespace: &str, key: &str, default: i32) -> Result<i32, StorageError> {
        Ok(self.peek(namespace, key).unwrap_or(default))
    }

    fn put_int(&mut self, namespace: &str, key: &str, value: i32) -> Result<(), StorageError> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as a JSON document on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: Document,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Document::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                StorageError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Document::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!(path = %path.display(), "opened preference store");
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `doc` to a sibling temp file, syncs it, then renames it over
    /// the store file.
    fn persist(&self, doc: &Document) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(doc)
            .map_err(|err| io_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_int(&mut self, namespace: &str, key: &str, default: i32) -> Result<i32, StorageError> {
        Ok(lookup(&self.data, namespace, key).unwrap_or(default))
    }

    fn put_int(&mut self, namespace: &str, key: &str, value: i32) -> Result<(), StorageError> {
        let mut next = self.data.clone();
        next.entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);

        // Memory only changes once the file is on disk.
        self.persist(&next)?;
        self.data = next;
        debug!(namespace, key, value, "persisted preference");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_default_when_absent() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("config", "theme", 2).unwrap(), 2);

        store.put_int("config", "theme", 1).unwrap();
        assert_eq!(store.get_int("config", "theme", 2).unwrap(), 1);
        assert_eq!(store.get_int("other", "theme", 7).unwrap(), 7);
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let mut first = MemoryStore::new();
        let second = first.clone();

        first.put_int("config", "accent", 4).unwrap();
        assert_eq!(second.peek("config", "accent"), Some(4));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("prefs.json")).unwrap();
        assert_eq!(store.get_int("config", "accent", 1).unwrap(), 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FileStore::open(&path).unwrap();
        store.put_int("config", "theme", 1).unwrap();
        store.put_int("config", "accent", 9).unwrap();
        drop(store);

        let mut reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_int("config", "theme", 2).unwrap(), 1);
        assert_eq!(reopened.get_int("config", "accent", 1).unwrap(), 9);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_file_store_failed_write_keeps_old_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = FileStore::open(&path).unwrap();
        store.put_int("config", "theme", 2).unwrap();

        // A directory where the temp file should go makes the create fail.
        fs::create_dir(path.with_extension("json.tmp")).unwrap();
        assert!(store.put_int("config", "theme", 1).is_err());
        assert_eq!(store.get_int("config", "theme", 0).unwrap(), 2);
    }
}
