//! Persisted refresh and access token rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A refresh token issued at login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// The raw signed token.
    pub token: String,
    /// Owner of the session.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `0` while active, else the epoch second of revocation.
    pub deleted_at: i64,
}

impl RefreshTokenRecord {
    pub fn is_live(&self) -> bool {
        self.deleted_at == 0
    }
}

/// An access token bound to the refresh token it was minted under.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessTokenRecord {
    /// The raw signed token.
    pub token: String,
    /// Parent refresh token.
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: i64,
}

impl AccessTokenRecord {
    pub fn is_live(&self) -> bool {
        self.deleted_at == 0
    }
}
