//! Menu service: ratings of the current table session

use serde::de::IgnoredAny;
use shared::ApiEnvelope;
use shared::models::{Rating, RatingRequest};

use super::{envelope_data, require_data};
use crate::config::Service;
use crate::error::{ClientResult, OptionalExt};
use crate::http::{Auth, Gateway};

/// Rating endpoints
#[derive(Debug, Clone, Copy)]
pub struct RatingApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> RatingApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/ratings/menu/:id/me`; 404 or empty data is `None`
    pub async fn mine(&self, menu_id: &str) -> ClientResult<Option<Rating>> {
        let envelope: Option<ApiEnvelope<Rating>> = self
            .gateway
            .get(
                Service::Menu,
                &format!("/api/ratings/menu/{menu_id}/me"),
                Auth::Table,
            )
            .await
            .optional()?
            .flatten();
        match envelope {
            Some(envelope) => envelope_data(envelope),
            None => Ok(None),
        }
    }

    /// `POST /api/ratings`
    pub async fn create(&self, menu_id: &str, rating: u8) -> ClientResult<Rating> {
        let body = RatingRequest::new(menu_id, rating);
        let envelope = self
            .gateway
            .post(Service::Menu, "/api/ratings", &body, Auth::Table)
            .await?;
        require_data(envelope, "create rating")
    }

    /// `PUT /api/ratings/:id`
    pub async fn update(&self, rating_id: &str, menu_id: &str, rating: u8) -> ClientResult<Rating> {
        let body = RatingRequest::new(menu_id, rating);
        let envelope = self
            .gateway
            .put(
                Service::Menu,
                &format!("/api/ratings/{rating_id}"),
                &body,
                Auth::Table,
            )
            .await?;
        require_data(envelope, "update rating")
    }

    /// `DELETE /api/ratings/:id`
    pub async fn delete(&self, rating_id: &str) -> ClientResult<()> {
        let envelope: Option<ApiEnvelope<IgnoredAny>> = self
            .gateway
            .delete(
                Service::Menu,
                &format!("/api/ratings/{rating_id}"),
                Auth::Table,
            )
            .await?;
        if let Some(envelope) = envelope {
            envelope_data(envelope)?;
        }
        Ok(())
    }
}
