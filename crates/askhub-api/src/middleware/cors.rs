//! CORS layer construction.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use askhub_core::config::app::CorsConfig;

/// Builds the CORS layer from configuration.
///
/// A literal `"*"` origin opens everything (development); otherwise the
/// listed origins are allowed verbatim.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
