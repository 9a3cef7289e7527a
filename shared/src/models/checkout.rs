//! Checkout Model
//!
//! A checkout is the finalized-order record of a table session. Its
//! lifecycle is owned by the order service; clients never compute the next
//! state themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TableRef;

/// Checkout lifecycle state
///
/// Unrecognized values are preserved in [`CheckoutState::Other`] so a newer
/// service can introduce states without breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CheckoutState {
    Draft,
    Ordered,
    Preparing,
    Ready,
    Completed,
    /// Wire value `DELETE` (older admin builds also send `CANCELLED`)
    Cancelled,
    Other(String),
}

impl CheckoutState {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "DRAFT",
            Self::Ordered => "ORDERED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "DELETE",
            Self::Other(s) => s,
        }
    }

    /// No further transitions happen from a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl From<String> for CheckoutState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DRAFT" => Self::Draft,
            "ORDERED" => Self::Ordered,
            "PREPARING" => Self::Preparing,
            "READY" => Self::Ready,
            "COMPLETED" => Self::Completed,
            "DELETE" | "CANCELLED" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<CheckoutState> for String {
    fn from(state: CheckoutState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Checkout {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    pub state: CheckoutState,
    #[serde(default)]
    pub message: String,
}

/// Admin checkout list entry: the checkout with its order attached
///
/// The service has shipped two layouts for this list: the checkout fields
/// at the top level with `order` beside them, and `{ checkout, order }`.
/// Both decode into the same record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawCheckoutRecord")]
pub struct CheckoutRecord {
    pub id: String,
    pub state: CheckoutState,
    pub message: String,
    pub order: Option<CheckoutOrder>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCheckoutRecord {
    Nested {
        checkout: Checkout,
        #[serde(default)]
        order: Option<CheckoutOrder>,
    },
    Flat {
        #[serde(deserialize_with = "super::id::string_or_number")]
        id: String,
        state: CheckoutState,
        #[serde(default)]
        message: String,
        #[serde(default)]
        order: Option<CheckoutOrder>,
    },
}

impl From<RawCheckoutRecord> for CheckoutRecord {
    fn from(raw: RawCheckoutRecord) -> Self {
        match raw {
            RawCheckoutRecord::Nested { checkout, order } => Self {
                id: checkout.id,
                state: checkout.state,
                message: checkout.message,
                order,
            },
            RawCheckoutRecord::Flat {
                id,
                state,
                message,
                order,
            } => Self {
                id,
                state,
                message,
                order,
            },
        }
    }
}

impl CheckoutRecord {
    /// The checkout part alone
    pub fn checkout(&self) -> Checkout {
        Checkout {
            id: self.id.clone(),
            state: self.state.clone(),
            message: self.message.clone(),
        }
    }

    /// Table number of the order, if the service included it
    pub fn table_number(&self) -> Option<&str> {
        let order = self.order.as_ref()?;
        order
            .meja
            .as_ref()
            .map(|m| m.nomor_meja.as_str())
            .or(order.nomor_meja.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Order as embedded in the admin checkout list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrder {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, alias = "items")]
    pub order_items: Vec<CheckoutOrderItem>,
    #[serde(default)]
    pub meja: Option<TableRef>,
    #[serde(default)]
    pub nomor_meja: Option<String>,
    /// Server total, when included
    #[serde(default)]
    pub total: Option<f64>,
}

impl CheckoutOrder {
    pub fn item_count(&self) -> u32 {
        self.order_items.iter().map(|i| i.quantity).sum()
    }
}

/// Order line as embedded in the admin checkout list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOrderItem {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    pub menu_item_id: String,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_known_and_unknown() {
        let s: CheckoutState = serde_json::from_str(r#""PREPARING""#).unwrap();
        assert_eq!(s, CheckoutState::Preparing);

        let s: CheckoutState = serde_json::from_str(r#""CANCELLED""#).unwrap();
        assert_eq!(s, CheckoutState::Cancelled);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""DELETE""#);

        let s: CheckoutState = serde_json::from_str(r#""ON_HOLD""#).unwrap();
        assert_eq!(s, CheckoutState::Other("ON_HOLD".into()));
        assert!(!s.is_terminal());
    }

    #[test]
    fn numeric_checkout_id_is_accepted() {
        let c: Checkout =
            serde_json::from_str(r#"{"id":42,"state":"READY","message":""}"#).unwrap();
        assert_eq!(c.id, "42");
    }

    #[test]
    fn admin_list_entry_decodes_nested_order() {
        let json = r#"{"id":42,"state":"PREPARING","order":{"id":7,"locked":true,
            "createdAt":"2024-05-01T10:00:00","orderItems":[{"id":1,"menuItemId":"a","quantity":2}],
            "meja":{"nomorMeja":"M05","status":"Occupied"}}}"#;
        let record: CheckoutRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.checkout().id, "42");
        assert_eq!(record.table_number(), Some("M05"));
        assert_eq!(record.order.as_ref().map(|o| o.item_count()), Some(2));
    }

    #[test]
    fn admin_list_entry_decodes_wrapped_layout() {
        let json = r#"{"checkout":{"id":"c1","state":"CANCELLED","message":"x"},
            "order":{"id":"o1","nomorMeja":"M07","total":52500,
            "items":[{"id":"i1","menuItemId":"a","quantity":3,"price":17500,"subtotal":52500}]}}"#;
        let record: CheckoutRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "c1");
        assert_eq!(record.state, CheckoutState::Cancelled);
        assert_eq!(record.table_number(), Some("M07"));
        assert_eq!(record.order.as_ref().and_then(|o| o.total), Some(52500.0));
    }
}
