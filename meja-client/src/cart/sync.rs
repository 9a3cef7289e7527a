//! Drives a [`CartReconciler`] against the order service

use super::reconciler::{CartReconciler, LoadOutcome};
use crate::api::OrderApi;
use crate::error::{ClientError, ClientResult};
use crate::http::Gateway;
use crate::money;
use crate::route::Notice;

/// Cart plus the calls that keep it in step with the server
#[derive(Debug, Clone)]
pub struct CartSync {
    gateway: Gateway,
    cart: CartReconciler,
}

impl CartSync {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            cart: CartReconciler::new(),
        }
    }

    pub fn cart(&self) -> &CartReconciler {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartReconciler {
        &mut self.cart
    }

    /// Fetch the table's order. A table without an order (404) empties
    /// a synced cart.
    pub async fn refresh(&mut self) -> ClientResult<LoadOutcome> {
        match OrderApi::new(&self.gateway).current().await {
            Ok(order) => Ok(self.cart.load(order)),
            Err(ClientError::NotFound(_)) => Ok(self.cart.reset()),
            Err(e) => Err(e),
        }
    }

    /// Send the full line list and adopt the stored order
    pub async fn save(&mut self) -> ClientResult<Notice> {
        let request = self.cart.begin_save()?;
        tracing::debug!(lines = request.items.len(), "Saving cart");

        match OrderApi::new(&self.gateway).replace(&request).await {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    total = %money::format_idr_f64(order.total),
                    "Order saved"
                );
                self.cart.complete_save(order);
                Ok(Notice::info("Order Saved", "Your order has been saved successfully."))
            }
            Err(e) => {
                tracing::warn!("Failed to save order: {}", e);
                self.cart.fail_save(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete one stored line on the server, then refetch.
    ///
    /// The line also leaves the local cart, so unsaved edits kept across
    /// the refetch never send it back. A failed refetch is only logged.
    pub async fn remove_saved_item(&mut self, menu_item_id: &str) -> ClientResult<Notice> {
        let (line_id, name) = self
            .cart
            .baseline()
            .and_then(|o| o.item_for(menu_item_id))
            .map(|i| (i.id.clone(), i.menu_item_name.clone()))
            .ok_or_else(|| ClientError::NotFound(format!("order item for menu {menu_item_id}")))?;

        OrderApi::new(&self.gateway).remove_item(&line_id).await?;
        self.cart.forget_saved(menu_item_id);
        if let Err(e) = self.refresh().await {
            tracing::warn!(menu_item_id, "Failed to reload order after removal: {}", e);
        }
        Ok(Notice::info(
            "Item Removed",
            format!("{name} has been removed from your order."),
        ))
    }

    /// Save failure as an error toast
    pub fn save_failed_notice(error: &ClientError) -> Notice {
        Notice::error("Save Failed", error.to_string())
    }
}
