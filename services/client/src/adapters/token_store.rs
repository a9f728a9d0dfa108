//! services/client/src/adapters/token_store.rs
//!
//! Implementations of the `TokenStorage` port. The bearer token is the only
//! piece of state that outlives the process; it is stored under the fixed
//! key `token`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dnada_core::ports::{PortError, PortResult, TokenStorage};
use tracing::debug;

const TOKEN_KEY: &str = "token";

//=========================================================================================
// File-backed storage
//=========================================================================================

/// Keeps the token in a small JSON key/value file.
#[derive(Clone, Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> PortResult<HashMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(PortError::Storage(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| PortError::Storage(e.to_string()))
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PortError::Storage(e.to_string()))?;
            }
        }
        let raw =
            serde_json::to_string_pretty(entries).map_err(|e| PortError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| PortError::Storage(e.to_string()))
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> PortResult<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(TOKEN_KEY).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> PortResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "Persisted bearer token");
        Ok(())
    }

    fn remove(&self) -> PortResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "Removed bearer token");
        Ok(())
    }
}

//=========================================================================================
// In-memory storage
//=========================================================================================

/// Process-local storage, for hosts that should not persist credentials and for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> PortResult<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> PortResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| PortError::Storage(e.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> PortResult<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| PortError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
