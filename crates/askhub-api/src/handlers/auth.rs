//! Auth handlers — signup, login, logout, auth probe, password lifecycle.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::CookieJar;

use askhub_auth::account::{AuthState, IssuedSession};

use crate::dto::request::{
    ExternalSignupRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    SignupRequest, UpdatePasswordRequest,
};
use crate::dto::response::{
    AuthStateResponse, MessageResponse, SessionResponse, StatusResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::handlers::validate;
use crate::state::AppState;
use crate::transport;

/// Adds the session cookie for a fresh login to the jar.
fn with_session(jar: CookieJar, state: &AppState, session: &IssuedSession) -> CookieJar {
    jar.add(transport::session_cookie(
        &session.token.token,
        &state.config.auth,
    ))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>), ApiError> {
    validate(&req)?;

    let session = state
        .accounts
        .signup(&req.name, &req.email, &req.password)
        .await?;

    let jar = with_session(jar, &state, &session);
    Ok((StatusCode::CREATED, jar, Json(SessionResponse::from(&session))))
}

/// POST /api/auth/external — find-or-create for a verified identity.
pub async fn external_signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<ExternalSignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>), ApiError> {
    validate(&req)?;

    let (session, created) = state.accounts.find_or_create(&req.name, &req.email).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let jar = with_session(jar, &state, &session);
    Ok((status, jar, Json(SessionResponse::from(&session))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    validate(&req)?;

    let session = state.accounts.login(&req.email, &req.password).await?;

    let jar = with_session(jar, &state, &session);
    Ok((jar, Json(SessionResponse::from(&session))))
}

/// POST /api/auth/logout
///
/// Overwrites the cookie with a short-lived sentinel. Stateless tokens
/// are not revoked server-side.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<StatusResponse>) {
    (
        jar.add(transport::logout_cookie()),
        Json(StatusResponse::success()),
    )
}

/// GET /api/auth/state
///
/// The non-authoritative "am I logged in" probe. Answers 200 for
/// anonymous and authenticated callers alike; never an error status.
pub async fn auth_state(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Json<AuthStateResponse> {
    let token = transport::extract_token(&headers, &jar);

    let body = match state.accounts.auth_state(token.as_deref()).await {
        AuthState::Authenticated(user) => AuthStateResponse {
            is_login: true,
            user: Some(UserResponse::from(&user)),
            message: None,
        },
        AuthState::Anonymous { message } => AuthStateResponse {
            is_login: false,
            user: None,
            message: Some(message),
        },
    };

    Json(body)
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate(&req)?;

    state.accounts.forgot_password(&req.email).await?;

    Ok(Json(MessageResponse {
        status: "success".to_string(),
        message: "Token sent to email".to_string(),
    }))
}

/// PATCH /api/auth/reset-password/{token}
pub async fn reset_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(token): Path<String>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    validate(&req)?;

    let session = state.accounts.reset_password(&token, &req.password).await?;

    let jar = with_session(jar, &state, &session);
    Ok((jar, Json(SessionResponse::from(&session))))
}

/// PATCH /api/auth/update-password (authenticated)
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    ApiJson(req): ApiJson<UpdatePasswordRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    validate(&req)?;

    let session = state
        .accounts
        .update_password(auth.user(), &req.password_current, &req.password)
        .await?;

    let jar = with_session(jar, &state, &session);
    Ok((jar, Json(SessionResponse::from(&session))))
}
