//! Request context carrying the authenticated user and their session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use authhub_auth::AuthSession;
use authhub_entity::user::UserRole;

/// Who is acting and through which session.
///
/// Built from the session the auth gate accepted and passed into service
/// methods that act on behalf of the caller.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: Uuid,
    /// Role from the access token claims.
    pub role: UserRole,
    pub access_token: String,
    pub refresh_token: String,
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn from_session(session: &AuthSession) -> Self {
        Self {
            user_id: session.claims.sub,
            role: session.claims.role,
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            request_time: Utc::now(),
        }
    }
}
