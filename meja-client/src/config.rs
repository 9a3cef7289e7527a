//! Client configuration

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

/// Logical backend a request is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Authentication service (admin accounts)
    Auth,
    /// Menu catalog service (menus, ratings)
    Menu,
    /// Order service (tables, orders, checkouts)
    Order,
    /// Web front-end helper endpoints (uploads, table cookie)
    Web,
}

impl Service {
    pub fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Menu => "menu",
            Self::Order => "order",
            Self::Web => "web",
        }
    }
}

/// Client configuration for connecting to the backend services
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Auth service base URL (e.g., "http://localhost:8082")
    pub auth_url: String,

    /// Menu service base URL
    pub menu_url: String,

    /// Order service base URL
    pub order_url: String,

    /// Web helper base URL (uploads, table binding)
    pub web_url: String,

    /// Directory holding the persisted session file; `None` keeps the
    /// session in memory only
    pub session_dir: Option<PathBuf>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a configuration with every service on the same base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            auth_url: base.clone(),
            menu_url: base.clone(),
            order_url: base.clone(),
            web_url: base,
            session_dir: None,
            timeout: 30,
        }
    }

    /// Load configuration from the environment (and `.env`, when present).
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `MEJA_AUTH_URL` | `http://localhost:8082` |
    /// | `MEJA_MENU_URL` | `http://localhost:8080` |
    /// | `MEJA_ORDER_URL` | `http://localhost:8081` |
    /// | `MEJA_WEB_URL` | `http://localhost:3000` |
    /// | `MEJA_SESSION_DIR` | unset (in-memory session) |
    /// | `MEJA_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> ClientResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = match lookup("MEJA_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("MEJA_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => 30,
        };

        Ok(Self {
            auth_url: lookup("MEJA_AUTH_URL").unwrap_or_else(|| "http://localhost:8082".into()),
            menu_url: lookup("MEJA_MENU_URL").unwrap_or_else(|| "http://localhost:8080".into()),
            order_url: lookup("MEJA_ORDER_URL").unwrap_or_else(|| "http://localhost:8081".into()),
            web_url: lookup("MEJA_WEB_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            session_dir: lookup("MEJA_SESSION_DIR").map(PathBuf::from),
            timeout,
        })
    }

    /// Set the auth service URL
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the menu service URL
    pub fn with_menu_url(mut self, url: impl Into<String>) -> Self {
        self.menu_url = url.into();
        self
    }

    /// Set the order service URL
    pub fn with_order_url(mut self, url: impl Into<String>) -> Self {
        self.order_url = url.into();
        self
    }

    /// Set the web helper URL
    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = url.into();
        self
    }

    /// Persist the session under this directory
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Base URL for a service, without trailing slash
    pub fn base_url(&self, service: Service) -> &str {
        let url = match service {
            Service::Auth => &self.auth_url,
            Service::Menu => &self.menu_url,
            Service::Order => &self.order_url,
            Service::Web => &self.web_url,
        };
        url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
