//! Local key-value storage backends
//!
//! The player store talks to device-local storage through this trait so tests
//! run against memory and the app against a file. Values are opaque strings;
//! the store layers JSON on top.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage backend failure
#[derive(Debug, Error)]
pub enum KvError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A minimal string key-value store
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
    fn remove(&mut self, key: &str) -> Result<(), KvError>;
}

/// In-memory backend for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), KvError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object mapping keys to string values.
///
/// The whole map is held in memory and written through on every set, which
/// is plenty for a handful of small keys.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileKv {
    /// Open (or create) the backing file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), KvError> {
        let json = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), KvError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_kv_round_trip() {
        let mut kv = MemoryKv::new();
        assert!(kv.get("players").unwrap().is_none());

        kv.set("players", "[]").unwrap();
        assert_eq!(kv.get("players").unwrap().as_deref(), Some("[]"));

        kv.remove("players").unwrap();
        assert!(kv.get("players").unwrap().is_none());
    }

    #[test]
    fn test_file_kv_persists_across_opens() {
        let dir = std::env::temp_dir().join("brick_breaker_kv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        let _ = std::fs::remove_file(&path);

        {
            let mut kv = FileKv::open(&path).unwrap();
            kv.set("settings", r#"{"difficulty":"hard","ballSpeed":8}"#)
                .unwrap();
        }

        let kv = FileKv::open(&path).unwrap();
        assert_eq!(
            kv.get("settings").unwrap().as_deref(),
            Some(r#"{"difficulty":"hard","ballSpeed":8}"#)
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_kv_rejects_corrupt_file() {
        let dir = std::env::temp_dir().join("brick_breaker_kv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corrupt.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(FileKv::open(&path), Err(KvError::Corrupt(_))));

        let _ = std::fs::remove_file(&path);
    }
}
