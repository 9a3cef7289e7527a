//! Web helper: object storage uploads

use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use shared::models::{DeleteObjectRequest, UploadMeta, UploadResponse};

use crate::config::Service;
use crate::error::{ClientError, ClientResult};
use crate::http::{Auth, Gateway};

/// Folder menu images are stored under
pub const MENU_IMAGE_FOLDER: &str = "rizzserve-menu";

/// Object key the upload endpoint stores a file under:
/// `<folder>/<key>.<ext>`, folder stripped of surrounding slashes and the
/// extension taken from the file name.
pub fn object_key(folder: &str, key: &str, file_name: &str) -> String {
    let folder = folder.strip_prefix('/').unwrap_or(folder);
    let folder = folder.strip_suffix('/').unwrap_or(folder);
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!("{folder}/{key}.{ext}")
}

/// Upload key for a menu image: `menu/<slug>/<millis>`
pub fn menu_image_key(name: &str, millis: i64) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    format!("menu/{slug}/{millis}")
}

/// Upload and delete through the web helper
#[derive(Debug, Clone, Copy)]
pub struct StorageApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> StorageApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /api/upload` (multipart `file` + `data`); returns the public URL
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        key: &str,
        folder: &str,
    ) -> ClientResult<String> {
        let meta = UploadMeta {
            key: key.to_string(),
            folder: folder.to_string(),
        };
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("data", serde_json::to_string(&meta)?);

        tracing::debug!(key = %object_key(folder, key, file_name), "Uploading object");
        let response: UploadResponse = self
            .gateway
            .post_multipart(Service::Web, "/api/upload", form, Auth::None)
            .await?;
        if response.url.is_empty() {
            return Err(ClientError::InvalidResponse("upload returned no url".into()));
        }
        Ok(response.url)
    }

    /// `DELETE /api/delete` with `fullKey = folder/key`
    pub async fn delete(&self, key: &str, folder: Option<&str>) -> ClientResult<()> {
        let full_key = match folder {
            Some(folder) if !folder.is_empty() => format!("{folder}/{key}"),
            _ => key.to_string(),
        };
        let _: IgnoredAny = self
            .gateway
            .delete_with_body(
                Service::Web,
                "/api/delete",
                &DeleteObjectRequest { full_key },
                Auth::None,
            )
            .await?;
        Ok(())
    }
}
