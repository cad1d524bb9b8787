//! RBAC middleware. Must run after [`require_auth`](super::auth::require_auth).

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use authhub_auth::AuthSession;
use authhub_auth::gate::AUTHORIZATION_REQUIRED;
use authhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Check `(role, route, method)` against the policy table.
///
/// The route is the matched pattern (`/auth/user/{id}`), not the raw path.
pub async fn enforce_rbac(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let role = request
        .extensions()
        .get::<AuthSession>()
        .map(|s| s.claims.role)
        .ok_or_else(|| AppError::unauthorized(AUTHORIZATION_REQUIRED))?;

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().as_str().to_string();

    if !state.rbac.enforce(role.as_str(), &path, &method)? {
        warn!(role = %role, path = %path, method = %method, "RBAC denied request");
        return Err(AppError::forbidden("Forbidden").into());
    }

    Ok(next.run(request).await)
}
