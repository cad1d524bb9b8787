//! Admin user management handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use crate::dto::request::{AdminRegisterRequest, UserListQuery};
use crate::dto::response::{UserListResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /admin/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AdminRegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .admin_service
        .register_user(&auth, req.account.into(), req.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<Json<UserListResponse>, ApiError> {
    let Query(query) = query?;
    let (filter, page) = query.into_parts();
    let users = state.admin_service.list_users(&filter, page).await?;
    Ok(Json(users.into()))
}
