//! User store implementation on PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use askhub_core::error::{AppError, ErrorKind};
use askhub_core::result::AppResult;
use askhub_entity::user::{NewUser, User, UserStore};

/// PostgreSQL-backed [`UserStore`].
///
/// Every mutation is a single-row UPDATE, so concurrent writers are
/// last-writer-wins and a cancelled request cannot expose a partially
/// updated record.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store on the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_reset_hash(
        &self,
        reset_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        // Expiry is inclusive: the credential is still live exactly at
        // its expiry instant.
        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE password_reset_token_hash = $1 AND password_reset_expires >= $2",
        )
        .bind(reset_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by reset token", e)
        })
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, role, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|d| d.is_unique_violation())
            {
                AppError::conflict("This email is already registered.")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    async fn set_reset_credential(
        &self,
        id: Uuid,
        reset_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE users \
             SET password_reset_token_hash = $2, password_reset_expires = $3 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(reset_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store reset credential", e)
        })?;
        Ok(())
    }

    async fn clear_reset_credential(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users \
             SET password_reset_token_hash = NULL, password_reset_expires = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear reset credential", e)
        })?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        // Password, change stamp, and credential cleanup in one
        // statement; there is no observable intermediate state.
        sqlx::query(
            "UPDATE users \
             SET password_hash = $2, password_changed_at = $3, \
                 password_reset_token_hash = NULL, password_reset_expires = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(changed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        Ok(())
    }
}
