//! Identity provider tag stored with each user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the account originated. Only stored, never federated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "auth_provider", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Account linked to a Google identity.
    Google,
    /// Local email/password account.
    Any,
}

impl AuthProvider {
    /// Return the provider as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Any => "any",
        }
    }
}

impl Default for AuthProvider {
    fn default() -> Self {
        Self::Any
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthProvider {
    type Err = authhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "any" => Ok(Self::Any),
            _ => Err(authhub_core::AppError::validation(format!(
                "Invalid provider: '{s}'. Expected one of: google, any"
            ))),
        }
    }
}
