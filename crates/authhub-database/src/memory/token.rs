//! In-memory [`SessionRegistry`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::token::{AccessTokenRecord, RefreshTokenRecord};

use crate::store::{SessionRegistry, SessionWindows, SweepReport};

#[derive(Debug, Default)]
struct Tables {
    refresh: HashMap<String, RefreshTokenRecord>,
    access: HashMap<String, AccessTokenRecord>,
}

impl Tables {
    /// Revoke every live access token under `refresh_token`.
    fn cascade(&mut self, refresh_token: &str, revoked_at: i64) -> u64 {
        let mut count = 0;
        for access in self
            .access
            .values_mut()
            .filter(|a| a.is_live() && a.refresh_token == refresh_token)
        {
            access.deleted_at = revoked_at;
            count += 1;
        }
        count
    }
}

fn revoked_at() -> i64 {
    Utc::now().timestamp().max(1)
}

/// Session registry whose two tables share one lock.
#[derive(Debug)]
pub struct MemorySessionRegistry {
    tables: RwLock<Tables>,
    windows: SessionWindows,
}

impl MemorySessionRegistry {
    pub fn new(windows: SessionWindows) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            windows,
        }
    }

    /// Shift a refresh token's creation time into the past.
    pub async fn backdate_refresh(&self, token: &str, age: TimeDelta) {
        if let Some(record) = self.tables.write().await.refresh.get_mut(token) {
            record.created_at = record.created_at - age;
        }
    }

    /// Shift an access token's creation time into the past.
    pub async fn backdate_access(&self, token: &str, age: TimeDelta) {
        if let Some(record) = self.tables.write().await.access.get_mut(token) {
            record.created_at = record.created_at - age;
        }
    }
}

impl Default for MemorySessionRegistry {
    fn default() -> Self {
        Self::new(SessionWindows::default())
    }
}

#[async_trait]
impl SessionRegistry for MemorySessionRegistry {
    async fn record_refresh(&self, token: &str, user_id: Uuid) -> AppResult<()> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        tables
            .refresh
            .entry(token.to_string())
            .and_modify(|r| {
                r.updated_at = now;
                r.deleted_at = 0;
            })
            .or_insert_with(|| RefreshTokenRecord {
                token: token.to_string(),
                user_id,
                created_at: now,
                updated_at: now,
                deleted_at: 0,
            });
        Ok(())
    }

    async fn record_access(&self, token: &str, refresh_token: &str) -> AppResult<()> {
        let now = Utc::now();
        let mut tables = self.tables.write().await;
        tables
            .access
            .entry(token.to_string())
            .and_modify(|a| {
                a.updated_at = now;
                a.deleted_at = 0;
            })
            .or_insert_with(|| AccessTokenRecord {
                token: token.to_string(),
                refresh_token: refresh_token.to_string(),
                created_at: now,
                updated_at: now,
                deleted_at: 0,
            });
        Ok(())
    }

    async fn refresh_owner(&self, token: &str) -> AppResult<Uuid> {
        let tables = self.tables.read().await;
        tables
            .refresh
            .get(token)
            .filter(|r| r.is_live())
            .map(|r| r.user_id)
            .ok_or_else(|| AppError::not_found("Refresh token not found"))
    }

    async fn revoke_refresh(&self, token: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let live = tables.refresh.get(token).is_some_and(|r| r.is_live());
        if !live {
            return Err(AppError::not_found("Refresh token not found"));
        }

        let at = revoked_at();
        tables.cascade(token, at);
        if let Some(record) = tables.refresh.get_mut(token) {
            record.deleted_at = at;
        }
        Ok(())
    }

    async fn revoke_access(&self, token: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let record = tables
            .access
            .get_mut(token)
            .ok_or_else(|| AppError::not_found("Access token not found"))?;
        record.deleted_at = revoked_at();
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let tokens: Vec<String> = tables
            .refresh
            .values()
            .filter(|r| r.is_live() && r.user_id == user_id)
            .map(|r| r.token.clone())
            .collect();

        let at = revoked_at();
        for token in &tokens {
            tables.cascade(token, at);
            if let Some(record) = tables.refresh.get_mut(token) {
                record.deleted_at = at;
            }
        }
        Ok(tokens.len() as u64)
    }

    async fn access_token_parent(&self, access_token: &str) -> AppResult<String> {
        let tables = self.tables.read().await;
        tables
            .access
            .get(access_token)
            .filter(|a| a.is_live())
            .map(|a| a.refresh_token.clone())
            .ok_or_else(|| AppError::not_found("Access token not found"))
    }

    async fn is_refresh_live(&self, token: &str) -> AppResult<bool> {
        let cutoff = self.windows.refresh_live_cutoff(Utc::now());
        let tables = self.tables.read().await;
        Ok(tables
            .refresh
            .get(token)
            .is_some_and(|r| r.is_live() && r.created_at > cutoff))
    }

    async fn is_access_live(&self, token: &str) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.access.get(token).is_some_and(|a| a.is_live()))
    }

    async fn sweep_expired(&self) -> AppResult<SweepReport> {
        let now = Utc::now();
        let refresh_cutoff = self.windows.refresh_retention_cutoff(now);
        let access_cutoff = self.windows.access_retention_cutoff(now);
        let at = revoked_at();

        let mut tables = self.tables.write().await;
        let expired: Vec<String> = tables
            .refresh
            .values()
            .filter(|r| r.is_live() && r.created_at < refresh_cutoff)
            .map(|r| r.token.clone())
            .collect();

        let mut report = SweepReport::default();
        for token in &expired {
            report.access_revoked += tables.cascade(token, at);
            if let Some(record) = tables.refresh.get_mut(token) {
                record.deleted_at = at;
                report.refresh_revoked += 1;
            }
        }

        for access in tables
            .access
            .values_mut()
            .filter(|a| a.is_live() && a.created_at < access_cutoff)
        {
            access.deleted_at = at;
            report.access_revoked += 1;
        }

        Ok(report)
    }

    async fn live_refresh_tokens_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let tables = self.tables.read().await;
        let mut live: Vec<&RefreshTokenRecord> = tables
            .refresh
            .values()
            .filter(|r| r.is_live() && r.user_id == user_id)
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(live.into_iter().map(|r| r.token.clone()).collect())
    }
}
