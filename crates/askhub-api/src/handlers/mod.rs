//! HTTP handlers.

pub mod admin;
pub mod auth;
pub mod health;

use askhub_core::error::AppError;
use validator::Validate;

/// Runs derive-based validation and folds failures into a 400.
pub(crate) fn validate(req: &impl Validate) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
