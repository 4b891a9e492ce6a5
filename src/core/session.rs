//! # Session Store
//!
//! Persists the bearer token in a small JSON key-value file
//! (`~/.booktrack/storage.json` by default). The token lives under the fixed
//! key `authToken` and is stored verbatim.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.
//!
//! The `*_auth_token` helpers never fail: I/O and parse errors are logged and
//! read back as "no token", so a broken store degrades to logged-out
//! behavior instead of crashing.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
    NoHome,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "storage parse error: {e}"),
            StoreError::NoHome => write!(f, "could not determine home directory"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}

type Entries = BTreeMap<String, String>;

/// Returns `~/.booktrack/storage.json`.
pub fn default_storage_path() -> Result<PathBuf, StoreError> {
    dirs::home_dir()
        .map(|h| h.join(".booktrack").join("storage.json"))
        .ok_or(StoreError::NoHome)
}

/// String key-value storage backed by one JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StoreError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, entries)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    /// The stored token, or `None` when absent or unreadable.
    pub fn auth_token(&self) -> Option<String> {
        match self.get_item(AUTH_TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("Error getting token: {}", e);
                None
            }
        }
    }

    pub fn set_auth_token(&self, token: &str) {
        match self.set_item(AUTH_TOKEN_KEY, token) {
            Ok(()) => debug!("Token stored at {}", self.path.display()),
            Err(e) => warn!("Error storing token: {}", e),
        }
    }

    pub fn remove_auth_token(&self) {
        match self.remove_item(AUTH_TOKEN_KEY) {
            Ok(()) => debug!("Token removed"),
            Err(e) => warn!("Error removing token: {}", e),
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
