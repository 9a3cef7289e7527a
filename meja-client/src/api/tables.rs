//! Order service: tables (meja) and table sessions

use serde::de::IgnoredAny;
use shared::MessageResponse;
use shared::models::{Meja, MejaUpsert, TableBinding, TableSession};

use crate::config::Service;
use crate::error::{ClientError, ClientResult};
use crate::http::{Auth, Gateway};

/// Table endpoints
#[derive(Debug, Clone, Copy)]
pub struct TableApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> TableApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/v1/meja` (admin)
    pub async fn list(&self) -> ClientResult<Vec<Meja>> {
        self.gateway
            .get(Service::Order, "/api/v1/meja", Auth::Admin)
            .await
    }

    /// `POST /api/v1/meja` (admin)
    pub async fn create(&self, nomor_meja: &str) -> ClientResult<Meja> {
        let body = MejaUpsert {
            nomor_meja: nomor_meja.to_string(),
        };
        self.gateway
            .post(Service::Order, "/api/v1/meja", &body, Auth::Admin)
            .await
    }

    /// `PUT /api/v1/meja/:id` (admin)
    pub async fn rename(&self, id: &str, nomor_meja: &str) -> ClientResult<Meja> {
        let body = MejaUpsert {
            nomor_meja: nomor_meja.to_string(),
        };
        self.gateway
            .put(Service::Order, &format!("/api/v1/meja/{id}"), &body, Auth::Admin)
            .await
    }

    /// `GET /api/v1/meja/nomor/:nomor`
    pub async fn find_by_number(&self, nomor_meja: &str) -> ClientResult<Meja> {
        self.gateway
            .get(
                Service::Order,
                &format!("/api/v1/meja/nomor/{nomor_meja}"),
                Auth::None,
            )
            .await
    }

    /// `POST /api/v1/meja/:id/session`
    pub async fn open_session(&self, table_id: &str) -> ClientResult<TableSession> {
        self.gateway
            .post_empty(
                Service::Order,
                &format!("/api/v1/meja/{table_id}/session"),
                Auth::None,
            )
            .await
    }

    /// `POST /api/v1/meja/session/deactivate`
    pub async fn deactivate_session(&self) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .post_empty(Service::Order, "/api/v1/meja/session/deactivate", Auth::Table)
            .await?;
        Ok(())
    }

    /// `POST /api/session` on the web helper: bind the browser to a
    /// QR-code table
    pub async fn bind(&self, table_id: &str) -> ClientResult<()> {
        let body = TableBinding {
            table_id: table_id.to_string(),
        };
        let response: MessageResponse = self
            .gateway
            .post(Service::Web, "/api/session", &body, Auth::None)
            .await?;
        if !response.success {
            return Err(ClientError::Rejected(response.message));
        }
        Ok(())
    }
}
