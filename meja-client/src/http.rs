//! HTTP gateway for the backend services
//!
//! Every service call goes through [`Gateway`]. It resolves the service
//! base URL, attaches the credential the call needs, and normalizes
//! non-2xx responses into [`ClientError`]. A 401 on a credentialed call
//! clears that credential from the shared session before the error is
//! returned.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, Service};
use crate::error::{ClientError, ClientResult, CredentialKind};
use crate::session::{SessionContext, SessionStorage};

/// Header carrying the customer table session
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Credential a call needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Public endpoint
    None,
    /// Customer endpoint (`X-Session-Id`)
    Table,
    /// Admin endpoint (`Authorization: Bearer`)
    Admin,
}

impl Auth {
    fn kind(self) -> Option<CredentialKind> {
        match self {
            Self::None => None,
            Self::Table => Some(CredentialKind::Table),
            Self::Admin => Some(CredentialKind::Admin),
        }
    }
}

/// Error body shapes the services use
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Gateway to the auth, menu, order and web services
#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    config: ClientConfig,
    session: SessionContext,
}

impl Gateway {
    /// Create a gateway sharing an existing session
    pub fn new(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            session,
        })
    }

    /// Create a gateway whose session is loaded from `config.session_dir`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.session_dir {
            Some(dir) => SessionContext::persistent(SessionStorage::in_dir(dir)),
            None => SessionContext::in_memory(),
        };
        Self::new(config, session)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a service path
    pub fn url(&self, service: Service, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url(service),
            path.trim_start_matches('/')
        )
    }

    fn request(
        &self,
        method: Method,
        service: Service,
        path: &str,
        auth: Auth,
    ) -> ClientResult<RequestBuilder> {
        let url = self.url(service, path);
        tracing::debug!(service = service.name(), %method, %url, "request");

        let mut req = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string());

        match auth {
            Auth::None => {}
            Auth::Table => {
                let session_id = self.session.require(CredentialKind::Table)?;
                req = req.header(SESSION_HEADER, session_id);
            }
            Auth::Admin => {
                let token = self.session.require(CredentialKind::Admin)?;
                req = req.bearer_auth(token);
            }
        }
        Ok(req)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder, auth: Auth) -> ClientResult<T> {
        let response = req.send().await?;
        self.handle_response(response, auth).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        auth: Auth,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                if let Some(kind) = auth.kind() {
                    return Err(self.session.invalidate(kind));
                }
            }
            let message = error_message(&text, status);
            tracing::debug!(status = status.as_u16(), %message, "request failed");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        decode(&text)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self
            .request(Method::GET, service, path, auth)?
            .header(CONTENT_TYPE, "application/json");
        self.send(req, auth).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        query: &Q,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self
            .request(Method::GET, service, path, auth)?
            .header(CONTENT_TYPE, "application/json")
            .query(query);
        self.send(req, auth).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, service, path, auth)?.json(body);
        self.send(req, auth).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self
            .request(Method::POST, service, path, auth)?
            .header(CONTENT_TYPE, "application/json");
        self.send(req, auth).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, service, path, auth)?.json(body);
        self.send(req, auth).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self
            .request(Method::DELETE, service, path, auth)?
            .header(CONTENT_TYPE, "application/json");
        self.send(req, auth).await
    }

    /// Make a DELETE request with JSON body
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self.request(Method::DELETE, service, path, auth)?.json(body);
        self.send(req, auth).await
    }

    /// Make a multipart POST request
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        form: reqwest::multipart::Form,
        auth: Auth,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, service, path, auth)?.multipart(form);
        self.send(req, auth).await
    }
}

/// Decode a success body; an empty body decodes as `null` so `()` and
/// `Option<_>` responses work for 204s.
fn decode<T: DeserializeOwned>(text: &str) -> ClientResult<T> {
    let body = if text.trim().is_empty() { "null" } else { text };
    Ok(serde_json::from_str(body)?)
}

/// Server-provided message, the raw body, or a generic fallback
fn error_message(text: &str, status: StatusCode) -> String {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
        if let Some(message) = body.message.or(body.error).filter(|m| !m.is_empty()) {
            return message;
        }
    }
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}
