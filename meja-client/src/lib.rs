//! Meja Client - SDK for the dine-in ordering services
//!
//! Talks to the auth, menu and order services (and the web helper used
//! for uploads) and holds the client-side state of a customer or admin:
//! the session, the cart being edited, checkout status, ratings and the
//! admin panels.
//!
//! ```no_run
//! # async fn run() -> meja_client::ClientResult<()> {
//! use meja_client::{ClientConfig, MejaClient};
//!
//! let client = MejaClient::new(&ClientConfig::from_env()?)?;
//! let next = client.customer().check_in("M05").await?;
//! println!("go to {}", next.route);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod customer;
pub mod error;
pub mod http;
pub mod money;
pub mod ratings;
pub mod route;
pub mod session;

pub use client::MejaClient;
pub use config::{ClientConfig, Service};
pub use error::{ClientError, ClientResult, CredentialKind, OptionalExt};
pub use http::{Auth, Gateway};
pub use route::{Notice, NoticeLevel, Route, Transition};
pub use session::{Session, SessionContext, SessionStorage};

// Re-export shared types for convenience
pub use shared::client::{Admin, AdminRegistration};
pub use shared::models::{Checkout, CheckoutRecord, CheckoutState, Meja, MenuItem, Order, Rating};
pub use shared::{ApiEnvelope, Page};
