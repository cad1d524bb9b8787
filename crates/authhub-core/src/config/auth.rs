//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing, password policy, and verification-code settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access tokens.
    #[serde(default = "default_access_secret")]
    pub access_token_secret: String,
    /// HMAC secret for refresh tokens. Must differ from the access secret.
    #[serde(default = "default_refresh_secret")]
    pub refresh_token_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: u64,
    /// Refresh token lifetime in calendar months.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_months: u32,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Lifetime of password-reset codes in seconds.
    #[serde(default = "default_code_ttl")]
    pub verification_code_ttl_seconds: u64,
    /// Number of digits in a password-reset code.
    #[serde(default = "default_code_length")]
    pub verification_code_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: default_access_secret(),
            refresh_token_secret: default_refresh_secret(),
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_months: default_refresh_ttl(),
            password_min_length: default_password_min(),
            verification_code_ttl_seconds: default_code_ttl(),
            verification_code_length: default_code_length(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_ACCESS_SECRET".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_REFRESH_SECRET".to_string()
}

fn default_access_ttl() -> u64 {
    60
}

fn default_refresh_ttl() -> u32 {
    1
}

fn default_password_min() -> usize {
    8
}

fn default_code_ttl() -> u64 {
    600
}

fn default_code_length() -> usize {
    6
}
