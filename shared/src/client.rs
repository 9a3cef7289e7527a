//! Auth-service DTOs shared between the SDK and its front ends
//!
//! Admin accounts live in the authentication service. Customers never
//! authenticate; they hold a table session instead (see [`crate::models::meja`]).

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Characters accepted as the "special" class of an admin password
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Admin registration form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminRegistration {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
    #[validate(
        length(min = 8, message = "Password must be at least 8 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// Admin profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admin {
    pub name: String,
    pub email: String,
}

/// Profile rename request (the auth service expects snake_case here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRequest {
    pub new_name: String,
}

/// Require one lowercase, one uppercase, one digit and one special character.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if lower && upper && digit && special {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some(
            "Password must contain uppercase, lowercase, number, and special character".into(),
        );
        Err(err)
    }
}
