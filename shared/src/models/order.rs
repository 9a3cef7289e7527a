//! Order Model
//!
//! The order is the server-persisted cart of one table session. Totals are
//! computed by the order service; clients only recompute them for display.

use serde::{Deserialize, Serialize};

/// Order line as returned by the order service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    pub menu_item_id: String,
    #[serde(default)]
    pub menu_item_name: String,
    #[serde(default)]
    pub menu_item_description: String,
    #[serde(default)]
    pub menu_item_category: Option<String>,
    /// Unit price in rupiah
    pub price: f64,
    pub quantity: u32,
    /// Server-computed `price * quantity`
    pub subtotal: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub meja_id: String,
    #[serde(default)]
    pub nomor_meja: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Locked once a checkout has been placed
    #[serde(default)]
    pub locked: bool,
    pub total: f64,
}

impl Order {
    /// Find the line for a menu item
    pub fn item_for(&self, menu_item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.menu_item_id == menu_item_id)
    }

    /// Total number of portions across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// One line of a replace-style order update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// Replace-style update: the service stores exactly these lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpdateOrderRequest {
    pub items: Vec<OrderLineRequest>,
}
