//! Authentication service: register, login, logout, token refresh.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use authhub_auth::{SessionIssuer, TokenPair};
use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::user::User;

use crate::context::RequestContext;
use crate::credentials::{CredentialStore, Registration};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Handles the unauthenticated account entry points and session teardown.
#[derive(Debug, Clone)]
pub struct AuthService {
    credentials: Arc<CredentialStore>,
    sessions: Arc<SessionIssuer>,
}

impl AuthService {
    pub fn new(credentials: Arc<CredentialStore>, sessions: Arc<SessionIssuer>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Create a regular account and open its first session.
    pub async fn register(&self, registration: Registration) -> AppResult<TokenPair> {
        let user = self.credentials.create_user(registration).await?;
        self.sessions.open(user.id, user.role).await
    }

    /// Verify credentials and open a new session.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let user = match self.credentials.authenticate(email, password).await {
            Ok(user) => user,
            Err(e) if matches!(e.kind, ErrorKind::NotFound | ErrorKind::Authentication) => {
                info!("Login rejected");
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
            Err(e) => return Err(e),
        };

        let pair = self.sessions.open(user.id, user.role).await?;
        info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Revoke the caller's session and every access token under it.
    pub async fn logout(&self, ctx: &RequestContext) -> AppResult<()> {
        self.sessions.close(&ctx.refresh_token).await?;
        info!(user_id = %ctx.user_id, "User logged out");
        Ok(())
    }

    /// Mint a fresh access token under a live refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        self.sessions.renew(refresh_token).await
    }

    /// Fetch a live user by id.
    pub async fn find_user(&self, id: Uuid) -> AppResult<User> {
        self.credentials
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
