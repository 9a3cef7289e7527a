//! Rating Model

use serde::{Deserialize, Serialize};

/// Rating left by one table session for one menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub menu_id: String,
    /// 1..=5
    pub rating: u8,
    #[serde(default)]
    pub created_at: String,
}

/// Reference to the rated menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuRef {
    pub id: String,
}

/// Create/update rating payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingRequest {
    pub menu: MenuRef,
    pub rating: u8,
}

impl RatingRequest {
    pub fn new(menu_id: impl Into<String>, rating: u8) -> Self {
        Self {
            menu: MenuRef { id: menu_id.into() },
            rating,
        }
    }
}
