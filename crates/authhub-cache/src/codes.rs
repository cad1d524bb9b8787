//! Password-reset verification codes.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use authhub_core::config::AuthConfig;
use authhub_core::result::AppResult;
use authhub_core::traits::cache::CacheProvider;

use crate::keys;
use crate::provider::CacheManager;

/// Numeric codes keyed by email, expiring after a fixed TTL.
#[derive(Debug, Clone)]
pub struct VerificationCodeStore {
    cache: CacheManager,
    ttl: Duration,
    length: usize,
}

impl VerificationCodeStore {
    pub fn new(cache: CacheManager, config: &AuthConfig) -> Self {
        Self {
            cache,
            ttl: Duration::from_secs(config.verification_code_ttl_seconds),
            length: config.verification_code_length.max(1),
        }
    }

    /// Random decimal code of the configured length.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }

    /// Generate a code for `email` and store it, replacing any pending one.
    pub async fn issue(&self, email: &str) -> AppResult<String> {
        let code = self.generate();
        self.cache
            .set(&keys::verification_code(email), &code, self.ttl)
            .await?;
        debug!(ttl_secs = self.ttl.as_secs(), "Verification code stored");
        Ok(code)
    }

    /// Pending code for `email`, or `None` if absent or expired.
    pub async fn pending(&self, email: &str) -> AppResult<Option<String>> {
        self.cache.get(&keys::verification_code(email)).await
    }

    /// Remove the pending code so it cannot be replayed.
    pub async fn consume(&self, email: &str) -> AppResult<()> {
        self.cache.delete(&keys::verification_code(email)).await
    }
}
