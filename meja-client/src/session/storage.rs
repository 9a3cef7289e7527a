// meja-client/src/session/storage.rs
// Session persistence - JSON file storage

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CredentialKind;

/// Default session file name
pub const SESSION_FILE: &str = "session.json";

/// Client-held credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Table session id (customer flow, sent as `X-Session-Id`)
    pub session_id: Option<String>,
    /// Admin bearer token
    pub auth_token: Option<String>,
    /// Table the customer checked in at
    pub table_id: Option<String>,
    /// Human-facing table number ("M05")
    pub table_number: Option<String>,
}

impl Session {
    /// Credential for a kind, if held
    pub fn credential(&self, kind: CredentialKind) -> Option<&str> {
        match kind {
            CredentialKind::Table => self.session_id.as_deref(),
            CredentialKind::Admin => self.auth_token.as_deref(),
        }
    }

    /// Drop one credential kind. Clearing the table session also forgets
    /// which table it belonged to.
    pub fn clear(&mut self, kind: CredentialKind) {
        match kind {
            CredentialKind::Table => {
                self.session_id = None;
                self.table_id = None;
                self.table_number = None;
            }
            CredentialKind::Admin => self.auth_token = None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Session file storage
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Storage at `<base_path>/<filename>`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    /// Storage at `<base_path>/session.json`
    pub fn in_dir(base_path: impl Into<PathBuf>) -> Self {
        Self::new(base_path, SESSION_FILE)
    }

    /// Make sure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save the session; an empty session removes the file
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        if session.is_empty() {
            return self.delete();
        }
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Load the session. A missing or unreadable file is no session.
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring corrupt session file: {}", e);
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the session file
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
