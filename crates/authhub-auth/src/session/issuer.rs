//! Minting token pairs and keeping the registry in step with them.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::SessionRegistry;
use authhub_entity::user::UserRole;

use crate::gate::{INVALID_TOKEN, SESSION_EXPIRED};
use crate::jwt::{TokenCodec, TokenKind, TokenPair};

const SESSION_CREATE_FAILED: &str = "Failed to create session";

/// Issues, renews and closes sessions.
#[derive(Clone)]
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    registry: Arc<dyn SessionRegistry>,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer").finish_non_exhaustive()
    }
}

impl SessionIssuer {
    pub fn new(codec: Arc<TokenCodec>, registry: Arc<dyn SessionRegistry>) -> Self {
        Self { codec, registry }
    }

    /// Mint a pair and record the refresh token, then the access token.
    ///
    /// If the access insert fails the refresh row is revoked again, so no
    /// half-recorded session survives.
    pub async fn open(&self, user_id: Uuid, role: UserRole) -> AppResult<TokenPair> {
        let pair = self.codec.issue_pair(user_id, role)?;

        if let Err(e) = self.registry.record_refresh(&pair.refresh_token, user_id).await {
            error!(user_id = %user_id, error = %e, "Failed to record refresh token");
            return Err(AppError::internal(SESSION_CREATE_FAILED));
        }

        if let Err(e) = self
            .registry
            .record_access(&pair.access_token, &pair.refresh_token)
            .await
        {
            error!(user_id = %user_id, error = %e, "Failed to record access token");
            if let Err(cleanup) = self.registry.revoke_refresh(&pair.refresh_token).await {
                warn!(user_id = %user_id, error = %cleanup, "Failed to roll back refresh token");
            }
            return Err(AppError::internal(SESSION_CREATE_FAILED));
        }

        info!(user_id = %user_id, role = %role, "Session opened");
        Ok(pair)
    }

    /// Mint a new access token under a live refresh token.
    pub async fn renew(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .codec
            .parse_and_verify(refresh_token, TokenKind::Refresh)?;

        if !self.registry.is_refresh_live(refresh_token).await? {
            return Err(AppError::unauthorized(SESSION_EXPIRED));
        }
        let owner = self.registry.refresh_owner(refresh_token).await?;
        if owner != claims.sub {
            return Err(AppError::unauthorized(INVALID_TOKEN));
        }

        let access_token = self.codec.issue_access(claims.sub, claims.role)?;
        self.registry
            .record_access(&access_token, refresh_token)
            .await?;

        info!(user_id = %claims.sub, "Access token renewed");
        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Revoke the session rooted at `refresh_token`.
    ///
    /// A session that is already gone reports `Session expired`.
    pub async fn close(&self, refresh_token: &str) -> AppResult<()> {
        match self.registry.revoke_refresh(refresh_token).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(AppError::unauthorized(SESSION_EXPIRED)),
            Err(e) => Err(e),
        }
    }

    /// Revoke every session of the user.
    pub async fn close_all(&self, user_id: Uuid) -> AppResult<u64> {
        let tokens = self.registry.live_refresh_tokens_for_user(user_id).await?;
        let revoked = self.registry.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, sessions = tokens.len(), revoked, "Closed all sessions");
        Ok(revoked)
    }
}
