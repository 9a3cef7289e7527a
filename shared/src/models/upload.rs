//! Object storage DTOs for the web helper endpoints

use serde::{Deserialize, Serialize};

/// Metadata sent alongside the uploaded file (multipart `data` part)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadMeta {
    pub key: String,
    pub folder: String,
}

/// Upload result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Delete request for a stored object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub full_key: String,
}
