//! Persistent session token slot.
//!
//! The token returned by login/register/refresh is kept in a single key-value
//! slot (`n_auth_token`). [`TokenStore`] is the only accessor; it never parses
//! or validates the token.
//!
//! A store without a storage backend models a non-client execution context
//! (e.g., the server half of the frontend): reads return `None` and writes do
//! nothing.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::Result;

/// Storage key of the session token.
pub const TOKEN_KEY: &str = "n_auth_token";

/// A string key-value store backing the token slot.
///
/// Each call is assumed atomic; implementations need no partial-write handling.
pub trait TokenStorage: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object file (`{"key": "value", ...}`).
///
/// Writes go to a sibling temporary file that is then renamed over the target.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Use the file at `path`. The file and its parent directories are created
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        match fs::remove_file(&tmp) {
            Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        let mut file = owner_only().create_new(true).write(true).open(&tmp)?;
        file.write_all(&serde_json::to_vec_pretty(entries)?)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Open options for a file only its owner may read.
fn owner_only() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

impl TokenStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Accessor for the session token slot.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: Option<Arc<dyn TokenStorage>>,
}

impl TokenStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Some(Arc::new(storage)),
        }
    }

    /// Create a store over a shared backend.
    #[must_use]
    pub fn from_shared(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Create a store with no backend: every read is `None`, every write is ignored.
    #[must_use]
    pub const fn detached() -> Self {
        Self { storage: None }
    }

    /// Returns `true` if the store has a backend.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.storage.is_some()
    }

    /// Current token, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        let storage = self.storage.as_ref()?;

        match storage.read(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Overwrite the token, or remove it when `token` is `None` or empty.
    pub fn set(&self, token: Option<&str>) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };

        let result = match token.filter(|t| !t.is_empty()) {
            Some(token) => storage.write(TOKEN_KEY, token),
            None => storage.remove(TOKEN_KEY),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to update stored token");
        }
    }

    /// Remove the token.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Returns `true` if a token is stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.get().is_some()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new(MemoryStorage::new())
    }
}
