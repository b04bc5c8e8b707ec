//! Durable key-value storage for session state.
//!
//! The session layer persists exactly two records through this interface:
//! the serialized user and the bearer token. The trait keeps that surface
//! minimal so tests can run against an in-memory map and embedders can
//! bring their own persistence.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// String-keyed durable storage.
///
/// Absence of a key is a valid result of `get`, not a failure. `set` and
/// `remove` may fail with IO errors on file-backed implementations.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed store.
///
/// The whole map is serialized as pretty JSON and rewritten atomically on
/// every change, so a concurrent reader (or a crash) never observes a
/// partial write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a store at `path`, loading existing entries if the file exists.
    ///
    /// A file that fails to parse is treated as empty; its contents are
    /// replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: HashMap<String, String> = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-memory store for tests and embedders that do not need persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Write data atomically using temp file + rename.
///
/// Readers either see the previous contents or the new contents, never a
/// partially written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Create temp file in same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_is_absent_not_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("kv.json"));
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn set_get_remove_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::open(temp.path().join("kv.json"));

        store.set("user", "{\"id\":\"u1\"}").unwrap();
        assert_eq!(store.get("user").as_deref(), Some("{\"id\":\"u1\"}"));

        store.remove("user").unwrap();
        assert_eq!(store.get("user"), None);

        // Removing again is fine.
        store.remove("user").unwrap();
    }

    #[test]
    fn entries_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kv.json");

        let mut store = FileStore::open(&path);
        store.set("token", "tok-123").unwrap();
        drop(store);

        let store = FileStore::open(&path);
        assert_eq!(store.get("token").as_deref(), Some("tok-123"));
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kv.json");
        fs::write(&path, "{definitely not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        // Writing replaces the corrupt contents.
        store.set("key", "value").unwrap();
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("key").as_deref(), Some("value"));
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kv.json");

        let mut store = FileStore::open(&path);
        store.set("a", "1").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }
}
