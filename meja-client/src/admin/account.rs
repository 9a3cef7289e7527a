//! Admin account: register, log in, profile

use shared::client::{Admin, AdminRegistration};
use validator::Validate;

use crate::api::AuthApi;
use crate::error::{ClientError, ClientResult, CredentialKind};
use crate::http::Gateway;
use crate::route::{Notice, Route, Transition};

const NAME_MAX_LEN: usize = 255;

/// The admin's own account
#[derive(Debug, Clone)]
pub struct AdminAccount {
    gateway: Gateway,
}

impl AdminAccount {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn is_logged_in(&self) -> bool {
        self.gateway.session().has(CredentialKind::Admin)
    }

    /// Validate locally, create the account, go to the login page
    pub async fn register(&self, registration: &AdminRegistration) -> ClientResult<Transition> {
        registration.validate()?;
        AuthApi::new(&self.gateway).register(registration).await?;
        tracing::info!(email = %registration.email, "Admin registered");
        Ok(Transition::to(Route::AdminLogin))
    }

    /// Exchange credentials for a token and open the dashboard
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Transition> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Email and password are required".into(),
            ));
        }
        let token = AuthApi::new(&self.gateway).login(email.trim(), password).await?;
        self.gateway.session().set_admin_token(token)?;
        Ok(Transition::to(Route::AdminDashboard))
    }

    /// Current admin; a rejected token is cleared
    pub async fn profile(&self) -> ClientResult<Admin> {
        AuthApi::new(&self.gateway).profile().await
    }

    pub async fn rename(&self, new_name: &str) -> ClientResult<Notice> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ClientError::Validation("Name is required".into()));
        }
        if new_name.chars().count() > NAME_MAX_LEN {
            return Err(ClientError::Validation(format!(
                "Name must be at most {NAME_MAX_LEN} characters"
            )));
        }
        AuthApi::new(&self.gateway).rename(new_name).await?;
        Ok(Notice::info(
            "Profile Updated",
            "Your profile information has been updated successfully.",
        ))
    }

    /// Delete the account and forget the token
    pub async fn delete_account(&self) -> ClientResult<Transition> {
        AuthApi::new(&self.gateway).delete().await?;
        self.gateway.session().clear(CredentialKind::Admin)?;
        tracing::info!("Admin account deleted");
        Ok(Transition::to(Route::AdminLogin))
    }

    /// Forget the token locally; the auth service keeps no session
    pub fn logout(&self) -> ClientResult<Transition> {
        self.gateway.session().clear(CredentialKind::Admin)?;
        Ok(Transition::to(Route::AdminLogin))
    }

    /// Profile update failure as an error toast
    pub fn update_failed_notice(error: &ClientError) -> Notice {
        Notice::error("Update Failed", error.to_string())
    }
}
