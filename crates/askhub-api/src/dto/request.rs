//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Please provide email and password!"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Please provide email and password!"))]
    pub password: String,
}

/// Find-or-create request for externally verified identities.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExternalSignupRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Verified email address.
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address to send the reset link to.
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
}

/// Reset-password request body (token travels in the path).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Password change request for an authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    /// Current password, re-confirmed before the change.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub password_current: String,
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}
