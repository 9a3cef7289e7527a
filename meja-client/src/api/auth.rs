//! Auth service: admin accounts

use serde::de::IgnoredAny;
use shared::client::{Admin, AdminLoginRequest, AdminLoginResponse, AdminRegistration, UpdateAdminRequest};

use crate::config::Service;
use crate::error::{ClientError, ClientResult, CredentialKind};
use crate::http::{Auth, Gateway};

/// Admin account endpoints
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /admin`
    pub async fn register(&self, registration: &AdminRegistration) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .post(Service::Auth, "/admin", registration, Auth::None)
            .await?;
        Ok(())
    }

    /// `POST /admin/login`; returns the bearer token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<String> {
        let request = AdminLoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AdminLoginResponse = self
            .gateway
            .post(Service::Auth, "/admin/login", &request, Auth::None)
            .await?;
        if response.token.is_empty() {
            return Err(ClientError::InvalidResponse("login returned an empty token".into()));
        }
        Ok(response.token)
    }

    /// `GET /admin`
    ///
    /// Any 4xx means the token is no good: it is cleared and
    /// `Unauthorized` is returned.
    pub async fn profile(&self) -> ClientResult<Admin> {
        match self.gateway.get(Service::Auth, "/admin", Auth::Admin).await {
            Err(e) if e.status().is_some_and(|s| (400..500).contains(&s)) => {
                Err(self.gateway.session().invalidate(CredentialKind::Admin))
            }
            other => other,
        }
    }

    /// `PUT /admin`
    pub async fn rename(&self, new_name: &str) -> ClientResult<()> {
        let request = UpdateAdminRequest {
            new_name: new_name.to_string(),
        };
        let _: IgnoredAny = self
            .gateway
            .put(Service::Auth, "/admin", &request, Auth::Admin)
            .await?;
        Ok(())
    }

    /// `DELETE /admin`
    pub async fn delete(&self) -> ClientResult<()> {
        let _: IgnoredAny = self
            .gateway
            .delete(Service::Auth, "/admin", Auth::Admin)
            .await?;
        Ok(())
    }
}
