//! JWT claims structure embedded in every session token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload of a session token.
///
/// A token is self-contained: subject, issue time, and expiry are all
/// the verifier needs. Nothing is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
