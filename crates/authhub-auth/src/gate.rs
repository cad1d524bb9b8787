//! Per-request session validation.
//!
//! The gate checks an access token together with the refresh token it was
//! minted under. Checks run in a fixed order and the first failure wins:
//!
//! 1. the raw `Authorization` value is present
//! 2. the access token verifies (else it is revoked)
//! 3. the access token has a live parent refresh token
//! 4. the refresh token verifies (else it is revoked with its children)
//! 5. the refresh token is within its live window
//! 6. the access token row is still live

use std::sync::Arc;

use tracing::{debug, warn};

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::SessionRegistry;

use crate::jwt::{Claims, TokenCodec, TokenKind};

pub const AUTHORIZATION_REQUIRED: &str = "Authorization is required";
pub const INVALID_TOKEN: &str = "Invalid token provided";
pub const SESSION_EXPIRED: &str = "Session expired";

/// A request that passed the gate.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Claims of the access token.
    pub claims: Claims,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
    registry: Arc<dyn SessionRegistry>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>, registry: Arc<dyn SessionRegistry>) -> Self {
        Self { codec, registry }
    }

    /// Validate the raw `Authorization` header value.
    ///
    /// Every rejection is an `Authentication` error; registry failures
    /// during the checks propagate unchanged.
    pub async fn authenticate(&self, authorization: Option<&str>) -> AppResult<AuthSession> {
        let access_token = match authorization.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AppError::unauthorized(AUTHORIZATION_REQUIRED)),
        };

        let claims = match self.codec.parse_and_verify(access_token, TokenKind::Access) {
            Ok(claims) => claims,
            Err(reason) => {
                debug!(%reason, "Access token rejected");
                if let Err(e) = self.registry.revoke_access(access_token).await {
                    if !e.is_not_found() {
                        warn!(error = %e, "Failed to revoke rejected access token");
                    }
                }
                return Err(AppError::unauthorized(INVALID_TOKEN));
            }
        };

        let refresh_token = match self.registry.access_token_parent(access_token).await {
            Ok(parent) => parent,
            Err(e) if e.is_not_found() => return Err(AppError::unauthorized(SESSION_EXPIRED)),
            Err(e) => return Err(e),
        };

        if let Err(reason) = self.codec.parse_and_verify(&refresh_token, TokenKind::Refresh) {
            debug!(%reason, user_id = %claims.sub, "Refresh token rejected");
            if let Err(e) = self.registry.revoke_refresh(&refresh_token).await {
                if !e.is_not_found() {
                    warn!(error = %e, user_id = %claims.sub, "Failed to revoke rejected refresh token");
                }
            }
            return Err(AppError::unauthorized(INVALID_TOKEN));
        }

        if !self.registry.is_refresh_live(&refresh_token).await? {
            return Err(AppError::unauthorized(SESSION_EXPIRED));
        }

        if !self.registry.is_access_live(access_token).await? {
            return Err(AppError::unauthorized(SESSION_EXPIRED));
        }

        Ok(AuthSession {
            claims,
            access_token: access_token.to_string(),
            refresh_token,
        })
    }
}
