//! Admin-only user management.

use std::sync::Arc;

use tracing::info;

use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_entity::user::{User, UserFilter, UserRole};

use crate::context::RequestContext;
use crate::credentials::{CredentialStore, Registration};

/// Operations reachable only after the RBAC check has passed.
#[derive(Debug, Clone)]
pub struct AdminService {
    credentials: Arc<CredentialStore>,
}

impl AdminService {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Create an account with the requested role.
    pub async fn register_user(
        &self,
        ctx: &RequestContext,
        registration: Registration,
        role: UserRole,
    ) -> AppResult<User> {
        let user = self.credentials.create_admin(registration, role).await?;
        info!(admin_id = %ctx.user_id, user_id = %user.id, role = %role, "Admin created user");
        Ok(user)
    }

    pub async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>> {
        self.credentials.list(filter, page).await
    }
}
