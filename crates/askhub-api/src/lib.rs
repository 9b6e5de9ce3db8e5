//! # askhub-api
//!
//! HTTP API layer for Askhub built on Axum.
//!
//! Provides the auth endpoints, session transport (bearer header +
//! cookie), the `AuthUser` extractor, role guarding, DTOs, and the
//! error-to-HTTP boundary.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod transport;

pub use app::serve;
pub use state::AppState;
