// meja-client/src/session/context.rs
// Session context - injected into the gateway, single invalidation point

use std::sync::Arc;

use parking_lot::RwLock;

use super::storage::{Session, SessionStorage};
use crate::error::{ClientError, ClientResult, CredentialKind};

/// Shared, optionally persisted session
///
/// Cloning is cheap and every clone sees the same credentials. Writes are
/// flushed to the session file (when configured) before returning.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Session>>,
    storage: Option<SessionStorage>,
}

impl SessionContext {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by a file; an existing file is loaded
    pub fn persistent(storage: SessionStorage) -> Self {
        let session = storage.load().unwrap_or_default();
        if !session.is_empty() {
            tracing::debug!(path = %storage.path().display(), "Restored session");
        }
        Self {
            inner: Arc::new(RwLock::new(session)),
            storage: Some(storage),
        }
    }

    /// Start from a given session (no persistence)
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
            storage: None,
        }
    }

    /// Apply a change and persist the result
    fn update<F>(&self, f: F) -> ClientResult<()>
    where
        F: FnOnce(&mut Session),
    {
        let snapshot = {
            let mut session = self.inner.write();
            f(&mut session);
            session.clone()
        };
        if let Some(storage) = &self.storage {
            storage.save(&snapshot)?;
        }
        Ok(())
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    pub fn table_session(&self) -> Option<String> {
        self.inner.read().session_id.clone()
    }

    pub fn admin_token(&self) -> Option<String> {
        self.inner.read().auth_token.clone()
    }

    pub fn table_id(&self) -> Option<String> {
        self.inner.read().table_id.clone()
    }

    pub fn table_number(&self) -> Option<String> {
        self.inner.read().table_number.clone()
    }

    pub fn has(&self, kind: CredentialKind) -> bool {
        self.inner.read().credential(kind).is_some()
    }

    /// Credential for a protected operation, or `NoSession`
    pub fn require(&self, kind: CredentialKind) -> ClientResult<String> {
        self.inner.read()
            .credential(kind)
            .map(str::to_string)
            .ok_or(ClientError::NoSession(kind))
    }

    /// Store a freshly opened table session
    pub fn set_table_session(
        &self,
        session_id: impl Into<String>,
        table_id: impl Into<String>,
        table_number: impl Into<String>,
    ) -> ClientResult<()> {
        let (session_id, table_id, table_number) =
            (session_id.into(), table_id.into(), table_number.into());
        tracing::info!(table = %table_number, "Table session opened");
        self.update(|s| {
            s.session_id = Some(session_id);
            s.table_id = Some(table_id);
            s.table_number = Some(table_number);
        })
    }

    /// Remember the QR-bound table without opening a session
    pub fn set_table_id(&self, table_id: impl Into<String>) -> ClientResult<()> {
        let table_id = table_id.into();
        self.update(|s| s.table_id = Some(table_id))
    }

    /// Store an admin bearer token
    pub fn set_admin_token(&self, token: impl Into<String>) -> ClientResult<()> {
        let token = token.into();
        tracing::info!("Admin token stored");
        self.update(|s| s.auth_token = Some(token))
    }

    /// Forget one credential kind (logout, cancel)
    pub fn clear(&self, kind: CredentialKind) -> ClientResult<()> {
        self.update(|s| s.clear(kind))
    }

    /// Forget everything
    pub fn clear_all(&self) -> ClientResult<()> {
        self.update(|s| *s = Session::default())
    }

    /// A service rejected the credential. Clears it and returns the error
    /// the caller should surface.
    pub fn invalidate(&self, kind: CredentialKind) -> ClientError {
        tracing::warn!(?kind, "Credential rejected, clearing session");
        if let Err(e) = self.clear(kind) {
            tracing::error!("Failed to persist session invalidation: {}", e);
        }
        ClientError::Unauthorized(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn require_reports_missing_kind() {
        let ctx = SessionContext::in_memory();
        assert!(matches!(
            ctx.require(CredentialKind::Table),
            Err(ClientError::NoSession(CredentialKind::Table))
        ));

        ctx.set_table_session("s1", "t1", "M05").unwrap();
        assert_eq!(ctx.require(CredentialKind::Table).unwrap(), "s1");
        assert!(!ctx.has(CredentialKind::Admin));
    }

    #[test]
    fn clones_share_state() {
        let a = SessionContext::in_memory();
        let b = a.clone();
        a.set_admin_token("tok").unwrap();
        assert_eq!(b.admin_token().as_deref(), Some("tok"));
    }

    #[test]
    fn invalidation_persists() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::in_dir(dir.path());

        let ctx = SessionContext::persistent(storage.clone());
        ctx.set_table_session("s1", "t1", "M05").unwrap();
        ctx.set_admin_token("tok").unwrap();

        let err = ctx.invalidate(CredentialKind::Table);
        assert!(matches!(err, ClientError::Unauthorized(CredentialKind::Table)));

        let reloaded = SessionContext::persistent(storage);
        assert_eq!(reloaded.table_session(), None);
        assert_eq!(reloaded.admin_token().as_deref(), Some("tok"));
    }
}
