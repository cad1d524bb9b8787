//! Auth handlers: register, login, logout, refresh, user lookup and
//! password recovery.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::ValidateEmail;

use authhub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest, ResetPasswordRequest};
use crate::dto::response::{MessageResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_user_id};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let pair = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(pair.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(pair.into()))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let pair = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(pair.into()))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth_service.logout(&auth).await?;
    Ok(Json(MessageResponse::new("Successfully logged out")))
}

/// GET /auth/user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.auth_service.find_user(id).await?;
    Ok(Json(user.into()))
}

/// POST /auth/forgot-password/{email}
pub async fn forgot_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !email.validate_email() {
        return Err(AppError::validation("Invalid email format").into());
    }

    state.recovery_service.request_reset(&email).await?;
    Ok(Json(MessageResponse::new(
        "Password reset code sent to your email",
    )))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .recovery_service
        .reset_password(&req.email, &req.password, &req.code)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successfully")))
}
