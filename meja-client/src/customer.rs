//! Customer table session: check in, QR binding, log out

use crate::api::TableApi;
use crate::error::{ClientError, ClientResult, CredentialKind};
use crate::http::Gateway;
use crate::route::{Notice, Route, Transition};

/// Entry and exit of a dine-in customer
#[derive(Debug, Clone)]
pub struct CustomerSession {
    gateway: Gateway,
}

impl CustomerSession {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn is_checked_in(&self) -> bool {
        self.gateway.session().has(CredentialKind::Table)
    }

    pub fn table_number(&self) -> Option<String> {
        self.gateway.session().table_number()
    }

    /// Look the table up by its number, open a session on it and go to
    /// the menu
    pub async fn check_in(&self, nomor_meja: &str) -> ClientResult<Transition> {
        let nomor_meja = nomor_meja.trim();
        if nomor_meja.is_empty() {
            return Err(ClientError::Validation("Table number is required".into()));
        }

        let tables = TableApi::new(&self.gateway);
        let meja = tables.find_by_number(nomor_meja).await?;
        let session = tables.open_session(&meja.id).await?;
        if session.session_id.is_empty() {
            return Err(ClientError::InvalidResponse(
                "table session response has no sessionId".into(),
            ));
        }

        self.gateway
            .session()
            .set_table_session(session.session_id, meja.id, meja.nomor_meja)?;
        Ok(Transition::to(Route::Menu))
    }

    /// Remember a table scanned from a QR code on the web helper
    pub async fn bind_table(&self, table_id: &str) -> ClientResult<()> {
        TableApi::new(&self.gateway).bind(table_id).await?;
        self.gateway.session().set_table_id(table_id)?;
        tracing::info!(table_id, "Table bound");
        Ok(())
    }

    /// Deactivate the table session and return to the entry page. The
    /// local session is cleared even if the service call fails.
    pub async fn logout(&self) -> ClientResult<Transition> {
        if self.is_checked_in() {
            if let Err(e) = TableApi::new(&self.gateway).deactivate_session().await {
                tracing::warn!("Failed to deactivate table session: {}", e);
            }
        }
        self.gateway.session().clear(CredentialKind::Table)?;
        Ok(Transition::to(Route::Home))
    }

    /// Check-in failure as an error toast
    pub fn login_failed_notice(error: &ClientError) -> Notice {
        Notice::error("Login Failed", error.to_string())
    }
}
