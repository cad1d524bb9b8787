//! Persistence traits shared by the Postgres and in-memory backends.

use async_trait::async_trait;
use chrono::{DateTime, Months, TimeDelta, Utc};
use uuid::Uuid;

use authhub_core::config::SessionConfig;
use authhub_core::result::AppResult;
use authhub_core::types::pagination::{PageRequest, PageResponse};
use authhub_entity::user::{NewUser, User, UserFilter};

/// Account persistence. Every lookup is scoped to live (not soft-deleted) rows.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user.
    ///
    /// Fails with `Conflict` when the email or phone number is already
    /// taken by a live account.
    async fn insert(&self, user: NewUser) -> AppResult<User>;

    /// Find a live user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a live user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List live users matching `filter`, newest first.
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> AppResult<PageResponse<User>>;

    /// Replace the password hash of the live user with this email.
    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<()>;

    /// Persist the profile fields of `user` and return the stored row.
    async fn update_profile(&self, user: &User) -> AppResult<User>;

    /// Mark the user as deleted.
    async fn soft_delete(&self, id: Uuid) -> AppResult<()>;
}

/// Counts of tokens revoked by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub refresh_revoked: u64,
    pub access_revoked: u64,
}

impl SweepReport {
    /// Whether the sweep changed nothing.
    pub fn is_empty(&self) -> bool {
        self.refresh_revoked == 0 && self.access_revoked == 0
    }
}

/// Age limits applied by [`SessionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindows {
    /// A refresh token counts as live only within this many days of creation.
    pub refresh_live_days: u32,
    /// The sweep revokes refresh tokens older than this many calendar months.
    pub refresh_retention_months: u32,
    /// The sweep revokes access tokens older than this many minutes.
    pub access_retention_minutes: u64,
}

impl SessionWindows {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            refresh_live_days: config.refresh_live_window_days,
            refresh_retention_months: config.refresh_retention_months,
            access_retention_minutes: config.access_retention_minutes,
        }
    }

    /// Refresh tokens created at or before this instant are no longer live.
    pub fn refresh_live_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - TimeDelta::days(i64::from(self.refresh_live_days))
    }

    /// Refresh tokens created before this instant are swept.
    pub fn refresh_retention_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.refresh_retention_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Access tokens created before this instant are swept.
    pub fn access_retention_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let minutes = i64::try_from(self.access_retention_minutes).unwrap_or(i64::MAX / 60_000);
        now.checked_sub_signed(TimeDelta::minutes(minutes))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for SessionWindows {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

/// Registry of issued refresh/access token pairs.
///
/// Tokens are soft-deleted: `deleted_at = 0` means active. Revoking a
/// refresh token revokes every access token minted under it in the same
/// transaction, so a live access token always has a live parent.
#[async_trait]
pub trait SessionRegistry: Send + Sync + 'static {
    /// Upsert a refresh token. Re-recording a revoked token re-activates it.
    async fn record_refresh(&self, token: &str, user_id: Uuid) -> AppResult<()>;

    /// Upsert an access token bound to `refresh_token`.
    async fn record_access(&self, token: &str, refresh_token: &str) -> AppResult<()>;

    /// Owner of a live refresh token, or `NotFound`.
    async fn refresh_owner(&self, token: &str) -> AppResult<Uuid>;

    /// Revoke a live refresh token and all of its access tokens.
    ///
    /// Returns `NotFound` if no live refresh token matched.
    async fn revoke_refresh(&self, token: &str) -> AppResult<()>;

    /// Revoke a single access token. Returns `NotFound` for an unknown token.
    async fn revoke_access(&self, token: &str) -> AppResult<()>;

    /// Revoke every live refresh token of the user and their access tokens.
    /// Returns the number of refresh tokens revoked.
    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Parent refresh token of a live access token, or `NotFound`.
    async fn access_token_parent(&self, access_token: &str) -> AppResult<String>;

    /// Live and created within the refresh live window.
    async fn is_refresh_live(&self, token: &str) -> AppResult<bool>;

    /// A live row exists for this access token.
    async fn is_access_live(&self, token: &str) -> AppResult<bool>;

    /// Revoke refresh tokens past retention (cascading to their access
    /// tokens), then access tokens past retention, in one transaction.
    async fn sweep_expired(&self) -> AppResult<SweepReport>;

    /// Live refresh tokens belonging to the user.
    async fn live_refresh_tokens_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>>;
}
