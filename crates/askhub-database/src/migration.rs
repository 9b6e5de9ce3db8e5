//! Embedded database migrations.

use sqlx::PgPool;

use askhub_core::error::{AppError, ErrorKind};

/// Run all pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e))
}
