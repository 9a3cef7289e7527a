//! Order service: the table's order (cart)

use serde::de::IgnoredAny;
use shared::models::{Order, UpdateOrderRequest};

use crate::config::Service;
use crate::error::ClientResult;
use crate::http::{Auth, Gateway};

/// Order endpoints, scoped to the current table session
#[derive(Debug, Clone, Copy)]
pub struct OrderApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> OrderApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/orders/table`
    pub async fn current(&self) -> ClientResult<Order> {
        self.gateway
            .get(Service::Order, "/api/orders/table", Auth::Table)
            .await
    }

    /// `PUT /api/orders`; the service replaces all lines with `request`
    pub async fn replace(&self, request: &UpdateOrderRequest) -> ClientResult<Order> {
        self.gateway
            .put(Service::Order, "/api/orders", request, Auth::Table)
            .await
    }

    /// `DELETE /api/orders/items/:id`
    pub async fn remove_item(&self, order_item_id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .delete(
                Service::Order,
                &format!("/api/orders/items/{order_item_id}"),
                Auth::Table,
            )
            .await?;
        Ok(())
    }
}
