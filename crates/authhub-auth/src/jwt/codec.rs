//! Signing and verification of access and refresh tokens.

use chrono::{DateTime, Months, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authhub_core::config::AuthConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::UserRole;

use super::claims::{Claims, TokenKind};
use super::error::TokenError;

/// Freshly minted access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// HS256 token codec. Access and refresh tokens use different secrets,
/// so one kind never verifies as the other.
pub struct TokenCodec {
    access: Keys,
    refresh: Keys,
    validation: Validation,
    access_ttl: TimeDelta,
    refresh_ttl: Months,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        let access_minutes = i64::try_from(config.access_token_ttl_minutes).unwrap_or(i64::MAX);
        Self {
            access: Keys::from_secret(&config.access_token_secret),
            refresh: Keys::from_secret(&config.refresh_token_secret),
            validation,
            access_ttl: TimeDelta::try_minutes(access_minutes).unwrap_or(TimeDelta::MAX),
            refresh_ttl: Months::new(config.refresh_token_ttl_months),
        }
    }

    /// Sign an access token expiring after the access TTL.
    pub fn issue_access(&self, subject: Uuid, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.access_ttl)
            .ok_or_else(|| AppError::internal("Access token expiry overflow"))?;
        self.sign(&claims(subject, role, now, exp), TokenKind::Access)
    }

    /// Sign a refresh token expiring after the refresh TTL in calendar months.
    pub fn issue_refresh(&self, subject: Uuid, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        let exp = now
            .checked_add_months(self.refresh_ttl)
            .ok_or_else(|| AppError::internal("Refresh token expiry overflow"))?;
        self.sign(&claims(subject, role, now, exp), TokenKind::Refresh)
    }

    /// Sign a new access/refresh pair for the subject.
    pub fn issue_pair(&self, subject: Uuid, role: UserRole) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(subject, role)?,
            refresh_token: self.issue_refresh(subject, role)?,
        })
    }

    /// Verify signature and expiry with the secret selected by `kind`.
    pub fn parse_and_verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let keys = self.keys(kind);
        let data = decode::<Claims>(token, &keys.decoding, &self.validation)?;
        Ok(data.claims)
    }

    /// Sign arbitrary claims with the secret selected by `kind`.
    pub fn sign(&self, claims: &Claims, kind: TokenKind) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys(kind).encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))
    }

    fn keys(&self, kind: TokenKind) -> &Keys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

fn claims(subject: Uuid, role: UserRole, iat: DateTime<Utc>, exp: DateTime<Utc>) -> Claims {
    Claims {
        sub: subject,
        role,
        iat: iat.timestamp(),
        exp: exp.timestamp(),
        jti: Uuid::new_v4(),
    }
}
