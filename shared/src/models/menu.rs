//! Menu Model

use serde::{Deserialize, Serialize};

/// Menu item entity (owned by the menu service)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Price in rupiah
    pub price: f64,
    /// Remaining stock; `None` means untracked
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

impl MenuItem {
    /// Case-insensitive match against name and description
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Untracked stock counts as available
    pub fn is_available(&self) -> bool {
        self.quantity.is_none_or(|q| q > 0)
    }
}

/// Create/update menu payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuUpsert {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub quantity: Option<i32>,
    pub price: f64,
}
