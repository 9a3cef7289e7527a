//! Meja (dining table) Model

use serde::{Deserialize, Serialize};

/// Dining table entity (owned by the order service)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meja {
    #[serde(deserialize_with = "super::id::string_or_number")]
    pub id: String,
    pub nomor_meja: String,
    #[serde(default)]
    pub status: String,
}

impl Meja {
    /// Whether a customer session is currently open on this table
    pub fn is_occupied(&self) -> bool {
        self.status.eq_ignore_ascii_case("occupied")
    }
}

/// Table as embedded in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableRef {
    #[serde(default)]
    pub nomor_meja: String,
    #[serde(default)]
    pub status: String,
}

/// Create/rename table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MejaUpsert {
    pub nomor_meja: String,
}

/// Table session opened by a customer check-in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableSession {
    pub session_id: String,
}

/// QR-code table binding request for the web helper endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBinding {
    pub table_id: String,
}
