use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to (de)serialize value for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable string key-value storage.
///
/// Each key maps to one file inside the root directory. Writes replace the
/// whole value; the last write wins.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    root: PathBuf,
}

impl KeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;
        std::fs::write(self.path(key), value).map_err(|e| Self::io_error(key, e))
    }

    /// Remove a key. Removing a key that was never set is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::new(dir.path());
        assert_eq!(store.get("absent").expect("get"), None);
    }

    #[test]
    fn test_set_creates_root_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::new(dir.path().join("nested"));

        store.set("k", "first").expect("set");
        store.set("k", "second").expect("set");

        assert_eq!(store.get("k").expect("get").as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::new(dir.path());

        store.set("k", "v").expect("set");
        store.remove("k").expect("remove");
        store.remove("k").expect("second remove");

        assert_eq!(store.get("k").expect("get"), None);
    }
}
