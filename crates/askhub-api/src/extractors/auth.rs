//! `AuthUser` extractor — the per-request authentication gate.
//!
//! Walks the full chain: token off the wire → signature + expiry →
//! identity load → password-change invalidation. Any break in the chain
//! rejects the request with 401 before the handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use askhub_core::error::AppError;
use askhub_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;
use crate::transport;

/// Extracted authenticated user available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Returns the inner `User`.
    pub fn user(&self) -> &User {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = User;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = transport::extract_token(&parts.headers, &jar).ok_or_else(|| {
            AppError::authentication("You are not logged in! Please log in to get access.")
        })?;

        let user = state.accounts.authenticate(&token).await?;

        Ok(AuthUser(user))
    }
}
