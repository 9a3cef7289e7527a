//! Order service: checkouts

use serde::de::IgnoredAny;
use shared::models::{Checkout, CheckoutRecord};

use crate::config::Service;
use crate::error::{ClientError, ClientResult};
use crate::http::{Auth, Gateway};

/// Checkout endpoints
#[derive(Debug, Clone, Copy)]
pub struct CheckoutApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CheckoutApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/checkout/me`
    ///
    /// The service answers 400 or 404 (or an empty body) when the table
    /// has not checked out yet; all of those are `None`.
    pub async fn mine(&self) -> ClientResult<Option<Checkout>> {
        let result: ClientResult<Option<Checkout>> = self
            .gateway
            .get(Service::Order, "/api/checkout/me", Auth::Table)
            .await;
        match result {
            Err(ClientError::NotFound(_) | ClientError::BadRequest(_)) => Ok(None),
            other => other,
        }
    }

    /// `POST /api/checkout`
    pub async fn create(&self) -> ClientResult<Checkout> {
        self.gateway
            .post_empty(Service::Order, "/api/checkout", Auth::Table)
            .await
    }

    /// `DELETE /api/checkout/me`
    pub async fn cancel_mine(&self) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .delete(Service::Order, "/api/checkout/me", Auth::Table)
            .await?;
        Ok(())
    }

    /// `GET /api/checkout` (admin)
    pub async fn list(&self) -> ClientResult<Vec<CheckoutRecord>> {
        self.gateway
            .get(Service::Order, "/api/checkout", Auth::Admin)
            .await
    }

    /// `POST /api/checkout/:id/advance` (admin); the service picks the
    /// next state
    pub async fn advance(&self, checkout_id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .post_empty(
                Service::Order,
                &format!("/api/checkout/{checkout_id}/advance"),
                Auth::Admin,
            )
            .await?;
        Ok(())
    }
}
