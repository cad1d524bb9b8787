//! Auth gate middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Run the auth gate on the raw `Authorization` header.
///
/// On success the accepted [`AuthSession`](authhub_auth::AuthSession) is
/// stored in the request extensions for the extractors and RBAC.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let session = state.gate.authenticate(header).await?;
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
