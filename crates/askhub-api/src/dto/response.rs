//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use askhub_auth::account::IssuedSession;
use askhub_entity::user::User;

/// User summary for responses. Built field-by-field so credential
/// material can never ride along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Payload nested under `data` in session responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// The logged-in user.
    pub user: UserResponse,
}

/// Body returned by every endpoint that logs the caller in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Always `"success"`.
    pub status: String,
    /// The session token (also set as a cookie).
    pub token: String,
    /// Session payload.
    pub data: SessionData,
}

impl From<&IssuedSession> for SessionResponse {
    fn from(session: &IssuedSession) -> Self {
        Self {
            status: "success".to_string(),
            token: session.token.token.clone(),
            data: SessionData {
                user: UserResponse::from(&session.user),
            },
        }
    }
}

/// Minimal `{status}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"success"`.
    pub status: String,
}

impl StatusResponse {
    /// The standard success body.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// `{status, message}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Always `"success"`.
    pub status: String,
    /// Human-readable message.
    pub message: String,
}

/// Body of the non-fatal auth probe. Always 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStateResponse {
    /// Whether a valid session was presented.
    pub is_login: bool,
    /// The user, when logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    /// Why the caller is anonymous, when not logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body wrapped by the admin user lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    /// The requested user.
    pub user: UserResponse,
}

/// Generic success envelope for data-bearing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T: Serialize> {
    /// Always `"success"`.
    pub status: String,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}
