//! Integration tests for the auth gate and the session lifecycle.

mod helpers;

use chrono::TimeDelta;
use helpers::{TestApp, tokens};
use http::StatusCode;
use serde_json::json;

use authhub_database::SessionRegistry;

#[tokio::test]
async fn test_missing_authorization() {
    let app = TestApp::new();
    let response = app.request("GET", "/user/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Authorization is required");
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/user/profile", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Invalid token provided");
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    let (_, refresh) = app.register("swap@x.com").await;
    let response = app
        .request("GET", "/user/profile", None, Some(&refresh))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Invalid token provided");
}

#[tokio::test]
async fn test_logout_twice() {
    let app = TestApp::new();
    let (access, _) = app.register("bye@x.com").await;

    let first = app.request("POST", "/auth/logout", None, Some(&access)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Successfully logged out");

    let second = app.request("POST", "/auth/logout", None, Some(&access)).await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
    assert_eq!(second.error(), "Session expired");
}

#[tokio::test]
async fn test_logout_leaves_other_sessions() {
    let app = TestApp::new();
    let (first, _) = app.register("two@x.com").await;
    let (second, _) = tokens(&app.login("two@x.com", "password123").await);

    app.request("POST", "/auth/logout", None, Some(&first)).await;

    let response = app.request("GET", "/user/profile", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoked_refresh_fails_gate() {
    let app = TestApp::new();
    let (access, refresh) = app.register("revoke@x.com").await;

    app.registry.revoke_refresh(&refresh).await.unwrap();

    let response = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Session expired");
}

#[tokio::test]
async fn test_refresh_older_than_live_window() {
    let app = TestApp::new();
    let (access, refresh) = app.register("old@x.com").await;

    app.registry
        .backdate_refresh(&refresh, TimeDelta::days(8))
        .await;

    let response = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Session expired");
}

#[tokio::test]
async fn test_refresh_endpoint() {
    let app = TestApp::new();
    let (access, refresh) = app.register("renew@x.com").await;

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let (new_access, same_refresh) = tokens(&response);
    assert_ne!(new_access, access);
    assert_eq!(same_refresh, refresh);

    let profile = app
        .request("GET", "/user/profile", None, Some(&new_access))
        .await;
    assert_eq!(profile.status, StatusCode::OK);

    // Logging out through either access token closes the shared session.
    app.request("POST", "/auth/logout", None, Some(&new_access))
        .await;
    let after = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
    let old = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = TestApp::new();
    let (access, _) = app.register("mixup@x.com").await;

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(json!({ "refresh_token": access })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sweep_revokes_old_sessions() {
    let app = TestApp::new();
    let (access, refresh) = app.register("sweep@x.com").await;
    app.registry
        .backdate_refresh(&refresh, TimeDelta::days(40))
        .await;

    let report = app.registry.sweep_expired().await.unwrap();
    assert_eq!(report.refresh_revoked, 1);
    assert!(app.registry.sweep_expired().await.unwrap().is_empty());

    let response = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(response.error(), "Session expired");
}
