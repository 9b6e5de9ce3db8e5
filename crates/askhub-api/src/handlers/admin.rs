//! Admin handlers — role-gated user administration.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use askhub_core::error::AppError;

use crate::dto::response::{DataResponse, UserData, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::{ADMIN_ONLY, restrict_to};
use crate::state::AppState;

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<UserData>>, ApiError> {
    restrict_to(auth.user(), ADMIN_ONLY)?;

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("No user found with that ID"))?;

    Ok(Json(DataResponse::ok(UserData {
        user: UserResponse::from(&user),
    })))
}
