use crate::error::{storage_error, PlannerResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info};

/// Storage slot keys
pub mod keys {
    pub const EMPLOYEES: &str = "employees";
    pub const SHIFT_TIMES: &str = "shiftTimes";
    pub const EXPORT_SETTINGS: &str = "exportSettings";
    /// Committed schedule, carried between command line invocations
    pub const SCHEDULE: &str = "schedule";
}

/// String-keyed durable storage for preferences
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read a slot
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;

    /// Write a slot
    fn set(&self, key: &str, value: &str) -> PlannerResult<()>;

    /// Remove a slot
    fn remove(&self, key: &str) -> PlannerResult<()>;
}

/// In-memory implementation of the store (for testing)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| storage_error("In-memory store lock poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| storage_error("In-memory store lock poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PlannerResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| storage_error("In-memory store lock poisoned"))?;
        slots.remove(key);
        Ok(())
    }
}

/// Directory-backed store keeping one JSON file per slot
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> PlannerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Using data directory {}", dir.display());
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PlannerResult<PathBuf> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(storage_error(&format!("Invalid storage key: {}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(&format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path(key)?;
        // Replace atomically
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!("Stored slot {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> PlannerResult<()> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert_eq!(store.get(keys::EMPLOYEES).unwrap(), None);

        store.set(keys::EMPLOYEES, "[]").unwrap();
        assert_eq!(store.get(keys::EMPLOYEES).unwrap().as_deref(), Some("[]"));

        store.remove(keys::EMPLOYEES).unwrap();
        assert_eq!(store.get(keys::EMPLOYEES).unwrap(), None);
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data")).unwrap();

        assert_eq!(store.get(keys::SHIFT_TIMES).unwrap(), None);
        store.set(keys::SHIFT_TIMES, "{\"a\":1}").unwrap();
        assert_eq!(
            store.get(keys::SHIFT_TIMES).unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("data").join("shiftTimes.json").exists());

        // Reopening sees the same data
        let reopened = FileStore::new(dir.path().join("data")).unwrap();
        assert!(reopened.get(keys::SHIFT_TIMES).unwrap().is_some());

        reopened.remove(keys::SHIFT_TIMES).unwrap();
        reopened.remove(keys::SHIFT_TIMES).unwrap();
        assert_eq!(store.get(keys::SHIFT_TIMES).unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
