//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
///
/// The signing secret has no usable default: a blank secret is rejected
/// at startup rather than at the first request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_days: i64,
    /// Session cookie lifetime in days.
    #[serde(default = "default_cookie_ttl")]
    pub cookie_ttl_days: i64,
    /// Whether the session cookie carries the `Secure` flag.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Password reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: i64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Checks the invariants that must hold before the server starts.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (ASKHUB__AUTH__JWT_SECRET)",
            ));
        }
        if self.jwt_ttl_days <= 0 {
            return Err(AppError::configuration("auth.jwt_ttl_days must be positive"));
        }
        if self.reset_token_ttl_minutes <= 0 {
            return Err(AppError::configuration(
                "auth.reset_token_ttl_minutes must be positive",
            ));
        }
        Ok(())
    }
}

fn default_jwt_ttl() -> i64 {
    90
}

fn default_cookie_ttl() -> i64 {
    90
}

fn default_reset_ttl() -> i64 {
    10
}

fn default_argon2_memory() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
