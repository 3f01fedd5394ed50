//! Key-value blob storage backends.
//!
//! The mirror talks to storage through the [`Storage`] trait: opaque string
//! blobs under string keys, the same contract browser local storage offers.
//! [`FileStorage`] keeps one file per key in the platform data directory;
//! [`MemoryStorage`] backs tests and ephemeral sessions.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, StoreError};

/// A flat key-value store of text blobs.
pub trait Storage: Send {
    /// Read the blob under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (or overwrite) the blob under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the blob under `key`; absent keys are a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// File-backed storage: each key is a `<key>.json` file in one directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (or create) storage in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/nattstad/`
    /// - macOS:   `~/Library/Application Support/se.nattstad.nattstad/`
    /// - Windows: `{FOLDERID_RoamingAppData}\nattstad\nattstad\data\`
    ///
    /// Env: `NATTSTAD_DATA_DIR` overrides the platform location.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var("NATTSTAD_DATA_DIR") {
            if !dir.is_empty() {
                return Self::open_at(Path::new(&dir));
            }
        }
        let project_dirs =
            ProjectDirs::from("se", "nattstad", "nattstad").ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) storage rooted at an explicit directory.
    ///
    /// Useful for tests and for embedding the store inside custom layouts.
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        tracing::info!(path = %dir.display(), "opening blob storage");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open_at(dir.path()).expect("should open");

        assert!(storage.get("nattstad_users").unwrap().is_none());

        storage.set("nattstad_users", "[]").unwrap();
        assert_eq!(storage.get("nattstad_users").unwrap().as_deref(), Some("[]"));

        storage.set("nattstad_users", "[1]").unwrap();
        assert_eq!(
            storage.get("nattstad_users").unwrap().as_deref(),
            Some("[1]")
        );

        storage.remove("nattstad_users").unwrap();
        assert!(storage.get("nattstad_users").unwrap().is_none());
        // removing again is a no-op
        storage.remove("nattstad_users").unwrap();
    }

    #[test]
    fn memory_storage_round_trip() {
        let mut storage = MemoryStorage::default();
        assert!(storage.get("k").unwrap().is_none());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
    }
}
