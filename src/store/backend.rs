//! Storage backends for persisted drafts
//!
//! The draft store is a policy layer over any durable keyed storage with
//! get/set/delete semantics. The trait is mockable in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Durable keyed storage boundary behind the draft store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetch the stored payload for a key, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a payload under a key, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove the payload for a key (absent keys are not an error)
    async fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can keep a handle while
/// the draft store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// File-per-key JSON backend under the platform data directory
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Backend rooted at the platform data dir (e.g. `~/.local/share/...`)
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("io", "planstudio", "planstudio-forms")
            .context("could not determine a data directory")?;
        Ok(Self {
            dir: dirs.data_dir().join("drafts"),
        })
    }

    /// Backend rooted at an explicit directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // form keys may hold separators like "plan:2025"
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("failed to read draft file"),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.dir).context("failed to create drafts directory")?;
        fs::write(self.path_for(key), value).context("failed to write draft file")?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("failed to delete draft file"),
        }
    }
}
