//! Reset credential generation and hashing.
//!
//! The raw token is emailed to the user and never stored; only its
//! SHA-256 digest and expiry are persisted on the identity. A fast hash
//! is sufficient here — reset tokens are 32 bytes of CSPRNG output,
//! single-use, and time-boxed, unlike passwords.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Number of random bytes in a raw reset token.
const TOKEN_BYTES: usize = 32;

/// A freshly generated reset credential.
///
/// `token` goes to the user, `hash` and `expires_at` go to storage.
#[derive(Debug, Clone)]
pub struct ResetCredential {
    /// The raw token, hex-encoded. Hand to the user, never persist.
    pub token: String,
    /// SHA-256 hex digest of the raw token. Safe to persist.
    pub hash: String,
    /// Instant after which the credential is no longer accepted.
    /// The boundary is inclusive: valid while `now <= expires_at`.
    pub expires_at: DateTime<Utc>,
}

impl ResetCredential {
    /// Generates a new credential valid for `window` from now.
    pub fn generate(window: Duration) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let hash = hash_token(&token);

        Self {
            token,
            hash,
            expires_at: Utc::now() + window,
        }
    }
}

/// Computes the storable digest of a presented raw token.
pub fn hash_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
