//! API Response types
//!
//! The menu service wraps every payload in an envelope:
//! ```json
//! {
//!     "success": true,
//!     "message": "Menus fetched",
//!     "data": [ ... ],
//!     "total": 42
//! }
//! ```
//! The auth and order services return bare JSON and do not use it.

use serde::{Deserialize, Serialize};

/// Envelope returned by the menu service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the service accepted the request
    pub success: bool,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Response data (absent or `null` on failure and on empty lookups)
    pub data: Option<T>,
    /// Total number of items for list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Page number echoed by list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size echoed by list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl<T> ApiEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            data: Some(data),
            total: None,
            page: None,
            limit: None,
        }
    }

    /// Create a failed envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            total: None,
            page: None,
            limit: None,
        }
    }

    /// Attach a list total
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Split the envelope into its data, or the service message when the
    /// service reported a failure.
    pub fn into_data(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message)
        }
    }
}

/// Plain `{ success, message }` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One page of a list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Total number of items reported by the service
    pub total: u64,
    /// Whether another page is likely to exist
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from a list response.
    ///
    /// Services that omit `total` are assumed to have returned everything
    /// they have. A full page means there may be more.
    pub fn new(items: Vec<T>, page: u32, size: u32, total: Option<u64>) -> Self {
        let total = total.unwrap_or(items.len() as u64);
        let has_more = size > 0 && items.len() as u32 == size;
        Self {
            items,
            page,
            size,
            total,
            has_more,
        }
    }

    /// Number of pages implied by `total` and `size`
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            0
        } else {
            self.total.div_ceil(self.size as u64) as u32
        }
    }
}
