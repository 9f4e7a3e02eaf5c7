//! String key-value stores backing the community state.

use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// A string-to-string store, read and written one key at a time.
pub trait KeyValueStore {
    /// Value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Reads `key` as JSON. Missing keys yield `None`.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if the stored value is not valid JSON for `T`.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw).map_err(StoreError::from))
        .transpose()
}

/// Writes `value` under `key` as JSON.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or the write fails.
pub fn set_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    store.set(key, serde_json::to_string(value)?)
}

/// Volatile store for tests and one-shot runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// The whole document is rewritten on every change, through a sibling
/// temporary file renamed over the old one. In-memory entries only change
/// once the write has succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file starts an empty store; the
    /// file is created on the first write.
    ///
    /// # Errors
    ///
    /// * [`StoreError::Io`] if the file exists but cannot be read
    /// * [`StoreError::Json`] if the file is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.is_file() {
            let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            log::debug!("State file {} not found, starting empty", path.display());
            BTreeMap::new()
        };

        log::debug!("Opened {} with {} key(s)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(entries)?;
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;

        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(io_error(parent))?;
        file.write_all(raw.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(io_error(file.path()))?;
        file.persist(&self.path)
            .map_err(|e| io_error(&self.path)(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value);
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.flush(&entries)?;
        self.entries = entries;
        Ok(())
    }
}
