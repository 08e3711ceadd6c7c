//! Client-side key-value persistence.
//!
//! Values are strings, like browser local storage. Everything lives under the fixed
//! keys in [`keys`], and logout wipes the store wholesale.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Fixed storage keys.
pub mod keys {
    pub const SIDEBAR_COLLAPSED: &str = "sidebarCollapsed";
    pub const DARK_MODE: &str = "darkMode";
    pub const CURRENT_USER: &str = "currentUser";
    pub const AUTH_TOKEN: &str = "authToken";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Anything that can hold the persisted client state.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;

    /// `true` only when the stored value is exactly `"true"`.
    fn get_flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.set(key, if value { "true" } else { "false" })
    }
}

/// Volatile store: state lasts as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries().clear();
        Ok(())
    }
}

/// Store persisted as a flat JSON object, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(raw) if raw.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(raw) => serde_json::from_slice(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = entries.len(), "State file opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` and write the result; memory is only updated once the write lands.
    fn update(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        change(&mut next);
        self.write(&next)?;
        *entries = next;
        Ok(())
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        let io = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        std::fs::write(&tmp, encoded).map_err(io)?;
        std::fs::rename(&tmp, &self.path).map_err(io)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.update(|entries| entries.clear())
    }
}
