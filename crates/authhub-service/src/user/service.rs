//! Profile operations on the authenticated user's own account.

use std::sync::Arc;

use tracing::{info, warn};

use authhub_auth::SessionIssuer;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::{ProfileUpdate, User};

use crate::context::RequestContext;
use crate::credentials::CredentialStore;

#[derive(Debug, Clone)]
pub struct UserService {
    credentials: Arc<CredentialStore>,
    sessions: Arc<SessionIssuer>,
}

impl UserService {
    pub fn new(credentials: Arc<CredentialStore>, sessions: Arc<SessionIssuer>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.credentials
            .get_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Apply a partial update to the caller's profile.
    pub async fn update_profile(&self, ctx: &RequestContext, update: ProfileUpdate) -> AppResult<User> {
        let mut user = self.profile(ctx).await?;
        user.apply(update);
        let updated = self.credentials.update_profile(&user).await?;
        info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.profile(ctx).await?;
        if !self.credentials.verify_password(&user, old_password)? {
            return Err(AppError::unauthorized("Old password is incorrect"));
        }

        self.credentials
            .update_password(&user.email, new_password)
            .await?;
        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    /// Soft-delete the caller's account, then drop all of its sessions.
    ///
    /// Session cleanup is best effort; the account stays deleted either way.
    pub async fn delete_profile(&self, ctx: &RequestContext) -> AppResult<()> {
        self.credentials.soft_delete(ctx.user_id).await?;

        if let Err(e) = self.sessions.close_all(ctx.user_id).await {
            warn!(user_id = %ctx.user_id, error = %e, "Failed to revoke sessions of deleted user");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use authhub_core::error::ErrorKind;
    use authhub_database::SessionRegistry;

    use crate::testing::{Fixture, fixture, registration};

    async fn setup(f: &Fixture) -> (UserService, RequestContext) {
        let user = f
            .credentials
            .create_user(registration("ada@example.com"))
            .await
            .unwrap();
        let pair = f.sessions.open(user.id, user.role).await.unwrap();
        let ctx = RequestContext {
            user_id: user.id,
            role: user.role,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            request_time: Utc::now(),
        };
        let svc = UserService::new(
            Arc::new(f.credentials.clone()),
            Arc::new(f.sessions.clone()),
        );
        (svc, ctx)
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let f = fixture();
        let (svc, ctx) = setup(&f).await;

        let updated = svc
            .update_profile(
                &ctx,
                ProfileUpdate {
                    address: Some("12 St James's Square".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address.as_deref(), Some("12 St James's Square"));
        assert_eq!(updated.name, "Ada");
    }

    #[tokio::test]
    async fn test_change_password_checks_old() {
        let f = fixture();
        let (svc, ctx) = setup(&f).await;

        let err = svc
            .change_password(&ctx, "not-my-password", "new-password")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);

        svc.change_password(&ctx, "password123", "new-password")
            .await
            .unwrap();
        assert!(
            f.credentials
                .authenticate("ada@example.com", "new-password")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_profile_revokes_sessions() {
        let f = fixture();
        let (svc, ctx) = setup(&f).await;

        svc.delete_profile(&ctx).await.unwrap();

        assert!(!f.registry.is_access_live(&ctx.access_token).await.unwrap());
        assert!(!f.registry.is_refresh_live(&ctx.refresh_token).await.unwrap());
        assert!(svc.profile(&ctx).await.unwrap_err().is_not_found());
    }
}
