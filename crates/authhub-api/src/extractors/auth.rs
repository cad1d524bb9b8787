//! `AuthUser` extractor: the session accepted by the auth gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authhub_auth::AuthSession;
use authhub_auth::gate::AUTHORIZATION_REQUIRED;
use authhub_core::error::AppError;
use authhub_service::context::RequestContext;

use crate::error::ApiError;

/// Authenticated caller, available on routes behind `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<AuthSession>()
            .ok_or_else(|| AppError::unauthorized(AUTHORIZATION_REQUIRED))?;

        Ok(AuthUser(RequestContext::from_session(session)))
    }
}
