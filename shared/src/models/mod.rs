//! Data models
//!
//! Wire types for the menu, order and checkout services. Field names
//! follow the services' camelCase JSON.

pub mod checkout;
pub mod meja;
pub mod menu;
pub mod order;
pub mod rating;
pub mod upload;

// Re-exports
pub use checkout::*;
pub use meja::*;
pub use menu::*;
pub use order::*;
pub use rating::*;
pub use upload::*;

/// Serde helpers for identifiers that arrive as either strings or numbers
pub(crate) mod id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        })
    }
}
