//! Integration tests for registration, login and password recovery.

mod helpers;

use helpers::{TestApp, tokens};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_register_then_login_yields_new_pair() {
    let app = TestApp::new();
    let (access, refresh) = app.register("a@x.com").await;

    let wrong = app.login("a@x.com", "password124").await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(!wrong.error().is_empty());

    let response = app.login("a@x.com", "password123").await;
    assert_eq!(response.status, StatusCode::OK);
    let (access2, refresh2) = tokens(&response);
    assert_ne!(access, access2);
    assert_ne!(refresh, refresh2);

    let profile = app
        .request("GET", "/user/profile", None, Some(&access2))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["password_hash"], "");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("dup@x.com").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(TestApp::register_body("DUP@x.com")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), "Email already exists");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new();

    let mut body = TestApp::register_body("not-an-email");
    let response = app.request("POST", "/auth/register", Some(body.clone()), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    body["email"] = json!("short@x.com");
    body["password"] = json!("short");
    let response = app.request("POST", "/auth/register", Some(body.clone()), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    body["password"] = json!("password123");
    body["birth_date"] = json!("01/01/1999");
    let response = app.request("POST", "/auth/register", Some(body), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.get("error").is_some());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new();
    app.register("known@x.com").await;

    let unknown = app.login("unknown@x.com", "password123").await;
    let wrong = app.login("known@x.com", "wrong-password").await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.error(), wrong.error());
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new();
    let (access, _) = app.register("lookup@x.com").await;
    let profile = app.request("GET", "/user/profile", None, Some(&access)).await;
    let id = profile.body["id"].as_str().unwrap().to_string();

    let found = app
        .request("GET", &format!("/auth/user/{id}"), None, None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["email"], "lookup@x.com");
    assert_eq!(found.body["password_hash"], "");

    let bad = app.request("GET", "/auth/user/not-a-uuid", None, None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.error(), "Invalid user ID format");

    let missing = app
        .request(
            "GET",
            "/auth/user/00000000-0000-4000-8000-000000000000",
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error(), "User not found");
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    app.register("reset@x.com").await;

    let response = app
        .request("POST", "/auth/forgot-password/reset@x.com", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let code = app.codes.last_for("reset@x.com").expect("code was not sent");

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({ "email": "reset@x.com", "password": "brand-new-pass", "code": code })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Password reset successfully");

    assert_eq!(
        app.login("reset@x.com", "password123").await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("reset@x.com", "brand-new-pass").await.status,
        StatusCode::OK
    );

    // The code is single use.
    let replay = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({ "email": "reset@x.com", "password": "another-pass", "code": code })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.error(), "Invalid or expired code");
}

#[tokio::test]
async fn test_reset_with_wrong_code() {
    let app = TestApp::new();
    app.register("wrong@x.com").await;
    app.request("POST", "/auth/forgot-password/wrong@x.com", None, None)
        .await;
    let code = app.codes.last_for("wrong@x.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({ "email": "wrong@x.com", "password": "brand-new-pass", "code": wrong })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Invalid code");
}

#[tokio::test]
async fn test_forgot_password_errors() {
    let app = TestApp::new();

    let bad = app
        .request("POST", "/auth/forgot-password/not-an-email", None, None)
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request("POST", "/auth/forgot-password/ghost@x.com", None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.error(), "Email not found");

    let no_code = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({ "email": "ghost@x.com", "password": "brand-new-pass", "code": "123456" })),
            None,
        )
        .await;
    assert_eq!(no_code.status, StatusCode::UNAUTHORIZED);
    assert_eq!(no_code.error(), "Invalid or expired code");
}
