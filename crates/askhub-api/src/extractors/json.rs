//! JSON body extractor that answers through the shared error boundary.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use askhub_core::error::AppError;

use crate::error::ApiError;

/// Drop-in replacement for `axum::Json` on request bodies.
///
/// A body that fails deserialization is caller error, not a protocol
/// detail: the rejection becomes a `Validation` 400 with the standard
/// `{status, message}` body instead of Axum's plain-text 422.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}
