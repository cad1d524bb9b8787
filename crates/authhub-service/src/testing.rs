//! Fixtures shared by the service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use authhub_auth::{PasswordValidator, SessionIssuer, TokenCodec};
use authhub_cache::{CacheManager, VerificationCodeStore};
use authhub_cache::memory::MemoryCacheProvider;
use authhub_core::config::{AuthConfig, MemoryCacheConfig};
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_database::memory::{MemorySessionRegistry, MemoryUserStore};
use authhub_entity::user::Gender;

use crate::credentials::{CredentialStore, Registration};
use crate::sender::CodeSender;

pub fn registration(email: &str) -> Registration {
    Registration {
        name: "Ada".into(),
        surname: "Lovelace".into(),
        email: email.into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
        gender: Gender::Female,
        password: "password123".into(),
        phone_number: None,
        address: None,
    }
}

/// Captures sent codes instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingSender {
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl CodeSender for RecordingSender {
    async fn send_reset_code(&self, email: &str, code: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::internal("mailer down"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

pub struct Fixture {
    pub credentials: CredentialStore,
    pub registry: Arc<MemorySessionRegistry>,
    pub sessions: SessionIssuer,
    pub codes: VerificationCodeStore,
}

pub fn fixture() -> Fixture {
    let config = AuthConfig::default();
    let credentials = CredentialStore::new(
        Arc::new(MemoryUserStore::new()),
        PasswordValidator::new(&config),
    );
    let registry = Arc::new(MemorySessionRegistry::default());
    let sessions = SessionIssuer::new(Arc::new(TokenCodec::new(&config)), registry.clone());
    let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
        &MemoryCacheConfig { max_capacity: 100 },
    )));
    Fixture {
        credentials,
        registry,
        sessions,
        codes: VerificationCodeStore::new(cache, &config),
    }
}
