//! Document store backends and the typed handle over them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Raw string-keyed document storage.
///
/// Object-safe; the typed (de)serialization lives on [`Store`] and
/// backends stay trivial.
pub trait DocumentStore {
    /// Read the raw document, or `None` if absent/unreadable.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Write (replace) the raw document.
    fn put_raw(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Delete the document. Deleting an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory backend, used by tests and short-lived sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn put_raw(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.inner.borrow_mut().remove(key);
    }
}

/// File-backed backend: one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store documents under an explicit directory (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store documents under `{app_data_dir}/{app_name}`.
    pub fn in_app_data_dir(app_name: &str) -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory")?;
        Ok(Self::new(base.join(app_name)))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are `{prefix}_{name}`; anything else gets flattened so a key
        // can never escape the store directory.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl DocumentStore for FileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::warn!("failed to read document {key}: {err}");
                None
            }
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create store directory at {:?}", self.dir))?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("failed to write document {key} at {path:?}"))
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(err) = std::fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove document {key}: {err}");
            }
        }
    }
}

/// Cheaply cloneable typed handle over a backend.
///
/// On the read path a corrupt document logs a warning and reads as
/// absent; no page ever fails to open over a bad stored document.
#[derive(Clone)]
pub struct Store {
    backend: Rc<dyn DocumentStore>,
}

impl Store {
    pub fn new(backend: impl DocumentStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }

    /// Read and deserialize a document; absent or corrupt reads as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("corrupt document under {key}, treating as absent: {err}");
                None
            }
        }
    }

    /// Serialize and write a document.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize document for {key}"))?;
        self.backend.put_raw(key, &raw)
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
