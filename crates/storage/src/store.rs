//! Durable string key-value stores.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String keys to string values; the progress adapter's only contract with
/// durability. Reads are infallible by design: a backend that cannot produce
/// a value reports it as absent.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns `StoreError` if the value cannot be written through.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Ephemeral store for tests and runs without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON-object file.
///
/// Opening is lenient: a missing or malformed file starts the store empty
/// rather than failing, matching the "missing/corrupt degrades to defaults"
/// persistence contract. Every `set` rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl FileStore {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_else(|| {
                tracing::debug!(path = %path.display(), "starting with an empty store");
                HashMap::new()
            });
        Self { path, map }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string(&self.map)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = std::env::temp_dir().join(format!(
            "nasal-pairs-store-{}-{}.json",
            std::process::id(),
            line!()
        ));

        {
            let mut store = FileStore::open(&path);
            assert_eq!(store.get("score"), None);
            store.set("score", "7").unwrap();
        }

        let store = FileStore::open(&path);
        assert_eq!(store.get("score").as_deref(), Some("7"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_store_opens_empty_on_corrupt_file() {
        let path = std::env::temp_dir().join(format!(
            "nasal-pairs-store-{}-{}.json",
            std::process::id(),
            line!()
        ));
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        let _ = std::fs::remove_file(&path);
    }
}
