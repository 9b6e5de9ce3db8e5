//! Mail delivery trait for pluggable outbound mail backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for mail backends (HTTP relay, or tracing-only in development).
///
/// Delivery failures must surface as errors so the caller can roll back
/// any state minted for the message (e.g. a persisted reset-token hash).
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Send a password reset link to `email`, telling the recipient it
    /// stays valid for `valid_minutes`.
    ///
    /// `reset_url` embeds the raw single-use token; it must never be
    /// persisted or logged above debug level by implementations.
    async fn send_password_reset(
        &self,
        recipient_name: &str,
        email: &str,
        reset_url: &str,
        valid_minutes: i64,
    ) -> AppResult<()>;
}
