//! Bearer token storage and login.
//!
//! The token is an opaque string obtained from `POST /auth/login` and attached
//! as `Authorization: Bearer <token>` on every admin call. Storage is behind a
//! trait so embedders can choose persistence: [`FileTokenStore`] survives
//! restarts under a fixed filename, [`MemoryTokenStore`] lives for the
//! process only.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::ClientError;

/// Fixed key under which the token is persisted.
const TOKEN_FILE_NAME: &str = "botvj_admin_token";

/// Abstraction over where the bearer token lives.
pub trait TokenStore: Send + Sync {
    /// Return the stored token, if any.
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Persist a new token, replacing any previous one.
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Drop the stored token.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Process-lifetime token storage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, convenient for tests and service accounts.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.token.lock().expect("token lock poisoned").clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.token.lock().expect("token lock poisoned") = None;
        Ok(())
    }
}

/// Token storage in the user data directory under a fixed filename.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the platform data directory (e.g. `~/.local/share/botvj`).
    pub fn new() -> Result<Self, ClientError> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ClientError::TokenStorage("no user data directory".to_string()))?
            .join("botvj");
        Ok(Self {
            path: dir.join(TOKEN_FILE_NAME),
        })
    }

    /// Store at an explicit path. Used by tests.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::TokenStorage(e.to_string())),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::TokenStorage(e.to_string()))?;
        }
        std::fs::write(&self.path, token).map_err(|e| ClientError::TokenStorage(e.to_string()))?;
        debug!(path = %self.path.display(), "Bearer token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Bearer token cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::TokenStorage(e.to_string())),
        }
    }
}
