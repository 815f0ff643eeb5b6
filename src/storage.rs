//! Durable key-value storage for user preferences.
//!
//! The i18n core touches exactly one key, [`LANGUAGE_STORAGE_KEY`]. Both calls
//! are synchronous; there are no transactions, the last write wins.

use crate::error::StorageError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Storage key holding the selected language code.
pub const LANGUAGE_STORAGE_KEY: &str = "language";

/// Synchronous, process-local persistent storage keyed by string names.
pub trait PreferenceStorage: Send + Sync {
    /// Read `key`; `Ok(None)` when it has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ==================== In-Memory Storage ====================

#[derive(Debug, Default)]
struct MemoryState {
    values: HashMap<String, String>,
    reads: usize,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory storage. Clones share the same state, so a test can keep one
/// handle and give another to the controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `key = value`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .state()
            .values
            .insert(key.to_string(), value.to_string());
        storage
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current value of `key`, bypassing counters and failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.state().values.get(key).cloned()
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    /// Number of `get` calls, failed ones included.
    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    /// Make subsequent `get` calls fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.state().fail_reads = fail;
    }

    /// Make subsequent `set` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut state = self.state();
        state.reads += 1;
        if state.fail_reads {
            return Err(StorageError::Unavailable(format!("read of '{}' refused", key)));
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(StorageError::Unavailable(format!("write of '{}' refused", key)));
        }
        state.values.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }
}

// ==================== JSON File Storage ====================

/// Storage backed by one JSON object file.
///
/// A missing file reads as empty. Other keys in the file may hold any JSON
/// value and are carried through writes untouched; only string values are
/// visible through `get`. Every write rewrites the whole file through a
/// sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &Map<String, Value>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(values)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)
    }
}

impl PreferenceStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read_all()?.remove(key) {
            Some(Value::String(value)) => Ok(Some(value)),
            _ => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&values)
    }
}
