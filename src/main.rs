//! Askhub Server — authentication and account service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use askhub_core::config::AppConfig;
use askhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from TOML files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ASKHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Askhub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = askhub_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    askhub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Persistence + mail backends ──────────────────────
    let users: Arc<dyn askhub_entity::user::UserStore> =
        Arc::new(askhub_database::PgUserStore::new(db.pool().clone()));

    let mailer = askhub_mailer::build_mailer(&config.mail)?;
    tracing::info!(provider = %config.mail.provider, "Mail backend ready");

    // ── Step 3: Auth core ────────────────────────────────────────
    let accounts = Arc::new(askhub_auth::AccountManager::new(
        Arc::clone(&users),
        mailer,
        config.auth.clone(),
        config.mail.clone(),
    )?);

    // ── Step 4: HTTP server ──────────────────────────────────────
    let state = askhub_api::AppState {
        config: Arc::new(config),
        accounts,
        users,
    };

    askhub_api::serve(state).await?;

    db.close().await;
    tracing::info!("Askhub server stopped");
    Ok(())
}
