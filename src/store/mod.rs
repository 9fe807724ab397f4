//! Durable key-value persistence
//!
//! All persisted state goes through the [`PersistenceStore`] trait: a
//! synchronous key→string store where each `set` overwrites the whole value
//! for that key. Injecting the store keeps the progress tracker and the
//! exam answer store testable against [`MemoryStore`] instead of the real
//! data directory.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error raised by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read key {key:?}: {source}")]
    Read { key: String, source: io::Error },

    #[error("failed to write key {key:?}: {source}")]
    Write { key: String, source: io::Error },

    #[error("failed to remove key {key:?}: {source}")]
    Remove { key: String, source: io::Error },
}

/// A durable, synchronous key→string store
///
/// Writes are durable when the call returns; last write wins at key
/// granularity. Callers treat an unreadable or unparsable value the same as
/// an absent one.
pub trait PersistenceStore {
    /// Read the value for a key, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value for a key
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key entirely; removing an absent key is a no-op
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// File-backed store: one `<key>.json` file per key under a root directory
///
/// Keeping each key in its own file means the independent persisted blobs
/// (completed chapters, exam answers) never share a write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory (created lazily on write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl PersistenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read { key: key.to_string(), source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::Write { key: key.to_string(), source: e })?;
        std::fs::write(self.key_path(key), value)
            .map_err(|e| StoreError::Write { key: key.to_string(), source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove { key: key.to_string(), source: e }),
        }
    }
}

/// In-memory store for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with entries
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("completedChapters", r#"["joins"]"#).unwrap();
        assert_eq!(store.get("completedChapters").unwrap().as_deref(), Some(r#"["joins"]"#));
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn file_store_set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn file_store_remove_deletes_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(store.remove("never-set").is_ok());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::new(dir.path());
            store.set("k", "durable").unwrap();
        }
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("durable"));
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(!store.contains_key("k"));
    }
}
