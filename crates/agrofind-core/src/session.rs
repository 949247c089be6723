use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{AgrofindError, Result};

/// Persistence capability for the authentication flag.
///
/// Injected into `SessionGate` so the CLI uses the file-backed store and
/// tests use an in-memory double.
pub trait SessionStore: Send {
    /// Read the persisted flag; `None` when nothing is stored.
    fn get(&self) -> Option<bool>;
    fn set(&self, authenticated: bool) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Persisted session document: `~/.config/agrofind/session.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionState {
    #[serde(default)]
    authenticated: bool,
}

/// File-backed store. A missing or unparseable file reads as "not stored".
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("agrofind").join("session.toml"))
    }

    pub fn from_default() -> Result<Self> {
        let path = Self::default_path().ok_or_else(|| {
            AgrofindError::Session("cannot determine config directory".to_string())
        })?;
        Ok(Self::new(path))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<bool> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let state: SessionState = toml::from_str(&contents).unwrap_or_default();
        Some(state.authenticated)
    }

    fn set(&self, authenticated: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AgrofindError::Session(format!("failed to create config dir: {e}")))?;
        }
        let toml_str = toml::to_string_pretty(&SessionState { authenticated })
            .map_err(|e| AgrofindError::Session(format!("failed to serialize session: {e}")))?;
        std::fs::write(&self.path, toml_str)
            .map_err(|e| AgrofindError::Session(format!("failed to write session: {e}")))
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AgrofindError::Session(format!(
                "failed to remove session: {e}"
            ))),
        }
    }
}

/// In-memory store for tests. 0 = unset, 1 = stored false, 2 = stored true.
#[derive(Default)]
pub struct MemorySessionStore {
    flag: AtomicU8,
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<bool> {
        match self.flag.load(Ordering::SeqCst) {
            1 => Some(false),
            2 => Some(true),
            _ => None,
        }
    }

    fn set(&self, authenticated: bool) -> Result<()> {
        self.flag
            .store(if authenticated { 2 } else { 1 }, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.flag.store(0, Ordering::SeqCst);
        Ok(())
    }
}

/// Authentication gate.
///
/// Search, upload, and health operations all treat `is_authenticated()` as a
/// hard precondition. The flag is read once at construction (no remote call)
/// and survives restarts through the store.
pub struct SessionGate {
    store: Box<dyn SessionStore>,
    authenticated: bool,
}

impl SessionGate {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let authenticated = store.get().unwrap_or(false);
        Self {
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Idempotent: logging in twice just rewrites the flag.
    pub fn login(&mut self) -> Result<()> {
        self.authenticated = true;
        self.store.set(true)
    }

    /// Idempotent. Callers that own search state must reset it alongside.
    pub fn logout(&mut self) -> Result<()> {
        self.authenticated = false;
        self.store.remove()
    }
}
