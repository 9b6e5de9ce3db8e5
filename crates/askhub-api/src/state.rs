//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use askhub_auth::account::AccountManager;
use askhub_core::config::AppConfig;
use askhub_entity::user::UserStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account manager (auth core orchestrator).
    pub accounts: Arc<AccountManager>,
    /// User persistence port.
    pub users: Arc<dyn UserStore>,
}
