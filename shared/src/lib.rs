//! Shared types for the Meja ordering client
//!
//! Wire models for the auth, menu and order services, the response
//! envelope used by the menu service, and request DTOs shared between the
//! SDK and the command-line front end.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{ApiEnvelope, MessageResponse, Page};
