//! PostgreSQL session registry over `refresh_tokens` and `access_tokens`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;

use crate::store::{SessionRegistry, SessionWindows, SweepReport};

const REVOKED_NOW: &str = "EXTRACT(EPOCH FROM CURRENT_TIMESTAMP)::BIGINT";

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Repository for issued token pairs.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
    windows: SessionWindows,
}

impl TokenRepository {
    pub fn new(pool: PgPool, windows: SessionWindows) -> Self {
        Self { pool, windows }
    }
}

#[async_trait]
impl SessionRegistry for TokenRepository {
    async fn record_refresh(&self, token: &str, user_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token, user_id) VALUES ($1, $2) \
             ON CONFLICT (token) DO UPDATE SET updated_at = NOW(), deleted_at = 0",
        )
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to record refresh token"))?;
        Ok(())
    }

    async fn record_access(&self, token: &str, refresh_token: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO access_tokens (token, refresh_token) VALUES ($1, $2) \
             ON CONFLICT (token) DO UPDATE SET updated_at = NOW(), deleted_at = 0",
        )
        .bind(token)
        .bind(refresh_token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to record access token"))?;
        Ok(())
    }

    async fn refresh_owner(&self, token: &str) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM refresh_tokens WHERE token = $1 AND deleted_at = 0",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to look up refresh token"))?
        .ok_or_else(|| AppError::not_found("Refresh token not found"))
    }

    async fn revoke_refresh(&self, token: &str) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query(&format!(
            "UPDATE access_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE refresh_token = $1 AND deleted_at = 0"
        ))
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke access tokens"))?;

        let result = sqlx::query(&format!(
            "UPDATE refresh_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE token = $1 AND deleted_at = 0"
        ))
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke refresh token"))?;

        if result.rows_affected() == 0 {
            // Dropping `tx` rolls back the access-token update.
            return Err(AppError::not_found("Refresh token not found"));
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit revocation"))
    }

    async fn revoke_access(&self, token: &str) -> AppResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE access_tokens SET deleted_at = {REVOKED_NOW} WHERE token = $1"
        ))
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke access token"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Access token not found"));
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query(&format!(
            "UPDATE access_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE deleted_at = 0 AND refresh_token IN \
                 (SELECT token FROM refresh_tokens WHERE user_id = $1 AND deleted_at = 0)"
        ))
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke user access tokens"))?;

        let result = sqlx::query(&format!(
            "UPDATE refresh_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE user_id = $1 AND deleted_at = 0"
        ))
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke user refresh tokens"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit revocation"))?;
        Ok(result.rows_affected())
    }

    async fn access_token_parent(&self, access_token: &str) -> AppResult<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT refresh_token FROM access_tokens WHERE token = $1 AND deleted_at = 0",
        )
        .bind(access_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to look up access token"))?
        .ok_or_else(|| AppError::not_found("Access token not found"))
    }

    async fn is_refresh_live(&self, token: &str) -> AppResult<bool> {
        let cutoff = self.windows.refresh_live_cutoff(Utc::now());
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM refresh_tokens \
                            WHERE token = $1 AND deleted_at = 0 AND created_at > $2)",
        )
        .bind(token)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check refresh token"))
    }

    async fn is_access_live(&self, token: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM access_tokens WHERE token = $1 AND deleted_at = 0)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check access token"))
    }

    async fn sweep_expired(&self) -> AppResult<SweepReport> {
        let now = Utc::now();
        let refresh_cutoff = self.windows.refresh_retention_cutoff(now);
        let access_cutoff = self.windows.access_retention_cutoff(now);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let cascaded = sqlx::query(&format!(
            "UPDATE access_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE deleted_at = 0 AND refresh_token IN \
                 (SELECT token FROM refresh_tokens WHERE deleted_at = 0 AND created_at < $1)"
        ))
        .bind(refresh_cutoff)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to sweep access tokens of expired refresh tokens"))?
        .rows_affected();

        let refresh_revoked = sqlx::query(&format!(
            "UPDATE refresh_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE deleted_at = 0 AND created_at < $1"
        ))
        .bind(refresh_cutoff)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to sweep refresh tokens"))?
        .rows_affected();

        let aged = sqlx::query(&format!(
            "UPDATE access_tokens SET deleted_at = {REVOKED_NOW} \
             WHERE deleted_at = 0 AND created_at < $1"
        ))
        .bind(access_cutoff)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to sweep access tokens"))?
        .rows_affected();

        tx.commit()
            .await
            .map_err(db_error("Failed to commit sweep"))?;

        Ok(SweepReport {
            refresh_revoked,
            access_revoked: cascaded + aged,
        })
    }

    async fn live_refresh_tokens_for_user(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT token FROM refresh_tokens WHERE user_id = $1 AND deleted_at = 0 \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list refresh tokens"))
    }
}
