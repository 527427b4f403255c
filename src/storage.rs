//! Persistent string storage backends.
//!
//! `StorageBackend` has the shape of browser local storage: string keys,
//! string values, no expiry. Expiry is layered on top by
//! [`ExpiringStore`](crate::expiring::ExpiringStore).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StorageError;

/// String key-value storage that outlives a single page load.
pub trait StorageBackend {
    /// Get the value for a key. Returns `None` if the key does not exist.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a key, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage kept as a single JSON object in a file.
///
/// Every operation re-reads the file, so separate processes sharing the file
/// behave like successive page loads sharing browser storage. A missing file
/// is an empty store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load for a write: a corrupt file is replaced rather than blocking
    /// every later write.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), entries = items.len(), "Saved storage file");
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.load_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}
