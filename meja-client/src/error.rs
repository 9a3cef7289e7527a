//! Client error types

use thiserror::Error;

use crate::route::{Notice, Route};

/// Which credential a request needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// Customer table session (`X-Session-Id`)
    Table,
    /// Admin bearer token
    Admin,
}

impl CredentialKind {
    /// Page a user lands on when this credential is missing or rejected
    pub fn entry_route(self) -> Route {
        match self {
            Self::Table => Route::Home,
            Self::Admin => Route::AdminLogin,
        }
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential rejected by the service; it has already been cleared
    #[error("Authentication required")]
    Unauthorized(CredentialKind),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected as malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any other non-2xx status
    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Envelope reported `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Client-side validation failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Protected operation attempted without a credential
    #[error("No session found")]
    NoSession(CredentialKind),

    /// Action not allowed in the current state
    #[error("Cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-2xx status (other than 401) to an error
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::BadRequest(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status this error came from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Where to send the user, for errors that end the current session
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Unauthorized(kind) | Self::NoSession(kind) => Some(kind.entry_route()),
            _ => None,
        }
    }

    /// Error toast for a failed operation
    pub fn notice(&self, title: impl Into<String>) -> Notice {
        Notice::error(title, self.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages.join("; "))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Turn "not found" lookups into `None`
pub trait OptionalExt<T> {
    /// 404 means "no data"
    fn optional(self) -> ClientResult<Option<T>>;
}

impl<T> OptionalExt<T> for ClientResult<T> {
    fn optional(self) -> ClientResult<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
