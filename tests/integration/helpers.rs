//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the real router over in-memory stores, so the
//! tests need neither PostgreSQL nor Redis.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use authhub_api::{StateBuilder, build_app};
use authhub_auth::PasswordValidator;
use authhub_cache::CacheManager;
use authhub_cache::memory::MemoryCacheProvider;
use authhub_core::config::{AppConfig, MemoryCacheConfig};
use authhub_core::result::AppResult;
use authhub_database::memory::{MemorySessionRegistry, MemoryUserStore};
use authhub_database::{SessionWindows, UserStore};
use authhub_entity::user::UserRole;
use authhub_service::{CodeSender, CredentialStore, Registration};

/// Keeps reset codes instead of mailing them.
#[derive(Debug, Default)]
pub struct CapturedCodes {
    sent: Mutex<Vec<(String, String)>>,
}

impl CapturedCodes {
    pub fn last_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl CodeSender for CapturedCodes {
    async fn send_reset_code(&self, email: &str, code: &str) -> AppResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
    pub users: Arc<MemoryUserStore>,
    pub registry: Arc<MemorySessionRegistry>,
    pub codes: Arc<CapturedCodes>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::default();
        let users = Arc::new(MemoryUserStore::new());
        let registry = Arc::new(MemorySessionRegistry::new(SessionWindows::from_config(
            &config.session,
        )));
        let cache = CacheManager::from_provider(Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig { max_capacity: 1000 },
        )));
        let codes = Arc::new(CapturedCodes::default());

        let state = StateBuilder::new(config.clone(), users.clone(), registry.clone(), cache)
            .with_sender(codes.clone())
            .build()
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            config,
            users,
            registry,
            codes,
        }
    }

    /// Registration body for `email` with the standard test password.
    pub fn register_body(email: &str) -> Value {
        json!({
            "name": "Ali",
            "surname": "Valiyev",
            "email": email,
            "birth_date": "1999-01-01",
            "gender": "male",
            "password": "password123",
        })
    }

    /// Register through the API and return `(access, refresh)`.
    pub async fn register(&self, email: &str) -> (String, String) {
        let response = self
            .request("POST", "/auth/register", Some(Self::register_body(email)), None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        tokens(&response)
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Create an admin directly in the store and log in as them.
    pub async fn admin_session(&self, email: &str) -> String {
        let credentials = CredentialStore::new(
            self.users.clone() as Arc<dyn UserStore>,
            PasswordValidator::new(&self.config.auth),
        );
        credentials
            .create_admin(
                Registration {
                    name: "Root".into(),
                    surname: "Admin".into(),
                    email: email.into(),
                    birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                    gender: authhub_entity::user::Gender::Female,
                    password: "admin-password".into(),
                    phone_number: None,
                    address: None,
                },
                UserRole::Admin,
            )
            .await
            .expect("Failed to create admin");

        let response = self.login(email, "admin-password").await;
        assert_eq!(response.status, StatusCode::OK);
        tokens(&response).0
    }

    /// Send a request with an optional JSON body and raw `Authorization` value.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", token);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Pull `(access_token, refresh_token)` out of a token response.
pub fn tokens(response: &TestResponse) -> (String, String) {
    (
        response.body["access_token"]
            .as_str()
            .expect("missing access_token")
            .to_string(),
        response.body["refresh_token"]
            .as_str()
            .expect("missing refresh_token")
            .to_string(),
    )
}
