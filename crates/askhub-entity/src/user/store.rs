//! The persistence port the auth core talks to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use askhub_core::result::AppResult;

use super::model::{NewUser, User};

/// Narrow contract for user persistence.
///
/// The auth core never owns storage; it reads identities and requests
/// targeted single-record updates through this trait. Each mutation is
/// one atomic statement on one row, so concurrent callers are
/// last-writer-wins without explicit locking.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key. The returned record includes the
    /// password hash; serialization strips it.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the user holding `reset_hash` whose reset credential has not
    /// expired at `now`. The boundary is inclusive: a credential is still
    /// valid exactly at its expiry instant.
    async fn find_by_reset_hash(&self, reset_hash: &str, now: DateTime<Utc>)
    -> AppResult<Option<User>>;

    /// Create a new user and return the stored record.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite the reset credential fields. A second call supersedes the
    /// first; the earlier raw token becomes unusable.
    async fn set_reset_credential(
        &self,
        id: Uuid,
        reset_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Clear the reset credential fields.
    async fn clear_reset_credential(&self, id: Uuid) -> AppResult<()>;

    /// Replace the password hash, stamp `password_changed_at`, and clear
    /// any reset credential — all in one statement, so a cancelled caller
    /// can never leave a half-updated row.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()>;
}
