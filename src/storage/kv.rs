//! Key-value store backends
//!
//! The persisted namespace is a flat set of string keys, each holding one
//! JSON value. Writes are last-writer-wins per key.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::TallyError;

use super::file_io::{read_json_optional, remove_file_if_exists, write_json_atomic};

/// A flat namespace of JSON values keyed by name
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<Value>, TallyError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: Value) -> Result<(), TallyError>;

    /// Remove a key; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<(), TallyError>;

    /// Remove every key in the namespace
    fn clear_all(&self) -> Result<(), TallyError>;
}

/// Stores each key as `<key>.json` inside one directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, TallyError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(TallyError::Storage(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, TallyError> {
        read_json_optional(self.key_path(key)?)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), TallyError> {
        write_json_atomic(self.key_path(key)?, &value)
    }

    fn delete(&self, key: &str) -> Result<(), TallyError> {
        remove_file_if_exists(self.key_path(key)?)
    }

    fn clear_all(&self) -> Result<(), TallyError> {
        if !self.dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            TallyError::Storage(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| TallyError::Storage(format!("Failed to read directory entry: {}", e)))?
                .path();
            if path.extension().is_some_and(|ext| ext == "json") {
                remove_file_if_exists(&path)?;
            }
        }

        Ok(())
    }
}

/// In-process store, for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.remove(key);
        Ok(())
    }

    fn clear_all(&self) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("dailyRate").unwrap(), None);

        store.set("dailyRate", json!(80)).unwrap();
        store.set("dailyRate", json!(95.5)).unwrap();
        assert_eq!(store.get("dailyRate").unwrap(), Some(json!(95.5)));

        store.set("expenses", json!([])).unwrap();
        store.delete("expenses").unwrap();
        store.delete("expenses").unwrap();
        assert_eq!(store.get("expenses").unwrap(), None);

        store.set("workDays", json!({"2025-04-19": true})).unwrap();
        store.clear_all().unwrap();
        assert_eq!(store.get("dailyRate").unwrap(), None);
        assert_eq!(store.get("workDays").unwrap(), None);
    }

    #[test]
    fn test_memory_store_contract() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_json_file_store_contract() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&JsonFileStore::new(temp_dir.path().join("data")));
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");

        JsonFileStore::new(dir.clone())
            .set("workDays", json!({"2025-04-19": true}))
            .unwrap();

        let reopened = JsonFileStore::new(dir.clone());
        assert_eq!(
            reopened.get("workDays").unwrap(),
            Some(json!({"2025-04-19": true}))
        );
        assert!(dir.join("workDays.json").exists());
    }

    #[test]
    fn test_json_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", json!(1)).is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_clear_all_on_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("never-created"));
        store.clear_all().unwrap();
    }
}
