//! Typed endpoint wrappers
//!
//! One struct per backend resource. Each borrows the shared [`Gateway`]
//! so credentials and error handling stay in one place.

mod auth;
mod checkout;
mod menus;
mod orders;
mod ratings;
mod storage;
mod tables;

pub use auth::AuthApi;
pub use checkout::CheckoutApi;
pub use menus::{MenuApi, MenuQuery};
pub use orders::OrderApi;
pub use ratings::RatingApi;
pub use storage::{MENU_IMAGE_FOLDER, StorageApi, menu_image_key, object_key};
pub use tables::TableApi;

use shared::ApiEnvelope;

use crate::error::{ClientError, ClientResult};

/// Unwrap a menu-service envelope, keeping an absent payload as `None`
pub(crate) fn envelope_data<T>(envelope: ApiEnvelope<T>) -> ClientResult<Option<T>> {
    envelope.into_data().map_err(ClientError::Rejected)
}

/// Unwrap a menu-service envelope whose payload must be present
pub(crate) fn require_data<T>(envelope: ApiEnvelope<T>, what: &str) -> ClientResult<T> {
    envelope_data(envelope)?
        .ok_or_else(|| ClientError::InvalidResponse(format!("{what}: response has no data")))
}
