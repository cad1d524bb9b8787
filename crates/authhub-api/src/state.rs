//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authhub_auth::{AuthGate, PasswordValidator, RbacEnforcer, SessionIssuer, TokenCodec};
use authhub_cache::{CacheManager, VerificationCodeStore};
use authhub_core::config::AppConfig;
use authhub_core::result::AppResult;
use authhub_database::{SessionRegistry, UserStore};
use authhub_service::{
    AdminService, AuthService, CodeSender, CredentialStore, LogCodeSender, RecoveryService,
    UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    // Auth
    pub gate: Arc<AuthGate>,
    pub rbac: Arc<RbacEnforcer>,

    // Services
    pub auth_service: Arc<AuthService>,
    pub recovery_service: Arc<RecoveryService>,
    pub user_service: Arc<UserService>,
    pub admin_service: Arc<AdminService>,
}

/// Wires stores and configuration into an [`AppState`].
pub struct StateBuilder {
    config: AppConfig,
    users: Arc<dyn UserStore>,
    registry: Arc<dyn SessionRegistry>,
    cache: CacheManager,
    sender: Arc<dyn CodeSender>,
}

impl StateBuilder {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        registry: Arc<dyn SessionRegistry>,
        cache: CacheManager,
    ) -> Self {
        Self {
            config,
            users,
            registry,
            cache,
            sender: Arc::new(LogCodeSender),
        }
    }

    /// Replace the reset-code sender (logging by default).
    pub fn with_sender(mut self, sender: Arc<dyn CodeSender>) -> Self {
        self.sender = sender;
        self
    }

    pub fn build(self) -> AppResult<AppState> {
        let config = self.config;
        let codec = Arc::new(TokenCodec::new(&config.auth));
        let validator = PasswordValidator::new(&config.auth);
        let rbac = Arc::new(RbacEnforcer::from_config(&config.rbac)?);

        let gate = Arc::new(AuthGate::new(codec.clone(), self.registry.clone()));
        let sessions = Arc::new(SessionIssuer::new(codec, self.registry));
        let credentials = Arc::new(CredentialStore::new(self.users, validator.clone()));
        let codes = VerificationCodeStore::new(self.cache, &config.auth);

        Ok(AppState {
            gate,
            rbac,
            auth_service: Arc::new(AuthService::new(credentials.clone(), sessions.clone())),
            recovery_service: Arc::new(RecoveryService::new(
                credentials.clone(),
                codes,
                self.sender,
                validator,
            )),
            user_service: Arc::new(UserService::new(credentials.clone(), sessions)),
            admin_service: Arc::new(AdminService::new(credentials)),
            config: Arc::new(config),
        })
    }
}
