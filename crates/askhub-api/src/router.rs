//! Route definitions for the Askhub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: signup, login, logout, probe, password lifecycle
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/oauth", post(handlers::auth::external_signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/state", get(handlers::auth::auth_state))
        .route(
            "/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route(
            "/auth/reset-password/{token}",
            patch(handlers::auth::reset_password),
        )
        .route(
            "/auth/update-password",
            patch(handlers::auth::update_password),
        )
}

/// Admin endpoints, role-gated inside the handlers
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/users/{id}", get(handlers::admin::get_user))
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
