//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user in the Askhub system.
///
/// The password hash and reset-token fields are excluded from
/// serialization so they can never leak into a response payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address (unique, stored lowercase).
    pub email: String,
    /// User role.
    pub role: UserRole,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the password was last changed. `None` means never changed
    /// since signup.
    pub password_changed_at: Option<DateTime<Utc>>,
    /// SHA-256 hash of the live reset token, if one is outstanding.
    #[serde(skip_serializing, default)]
    pub password_reset_token_hash: Option<String>,
    /// Expiry of the outstanding reset token.
    #[serde(skip_serializing, default)]
    pub password_reset_expires: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns `true` if the password was changed after a token with the
    /// given issued-at timestamp (seconds since epoch) was signed.
    ///
    /// A token issued in the same second as the change is still honored;
    /// only strictly older tokens are invalidated.
    pub fn changed_password_after(&self, token_issued_at: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => token_issued_at < changed_at.timestamp(),
            None => false,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}
