//! Integration tests for profile self-service.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_profile_hides_password_hash() {
    let app = TestApp::new();
    let (access, _) = app.register("me@x.com").await;

    let response = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "me@x.com");
    assert_eq!(response.body["password_hash"], "");
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["provider"], "any");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new();
    let (access, _) = app.register("edit@x.com").await;

    let response = app
        .request(
            "PUT",
            "/user/profile",
            Some(json!({ "address": "Tashkent", "phone_number": "+998901234567" })),
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["address"], "Tashkent");
    assert_eq!(response.body["name"], "Ali");
    assert_eq!(response.body["password_hash"], "");
}

#[tokio::test]
async fn test_update_profile_phone_conflict() {
    let app = TestApp::new();
    let (first, _) = app.register("one@x.com").await;
    let (second, _) = app.register("other@x.com").await;

    let phone = json!({ "phone_number": "+998900000001" });
    let ok = app
        .request("PUT", "/user/profile", Some(phone.clone()), Some(&first))
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let clash = app
        .request("PUT", "/user/profile", Some(phone), Some(&second))
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
    assert_eq!(clash.error(), "Phone number already exists");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let (access, _) = app.register("pw@x.com").await;

    let wrong = app
        .request(
            "PUT",
            "/user/password",
            Some(json!({ "old_password": "not-it-at-all", "new_password": "new-password" })),
            Some(&access),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error(), "Old password is incorrect");

    let short = app
        .request(
            "PUT",
            "/user/password",
            Some(json!({ "old_password": "password123", "new_password": "short" })),
            Some(&access),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "PUT",
            "/user/password",
            Some(json!({ "old_password": "password123", "new_password": "new-password" })),
            Some(&access),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["message"], "Password changed successfully");

    assert_eq!(
        app.login("pw@x.com", "new-password").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_delete_profile() {
    let app = TestApp::new();
    let (access, _) = app.register("gone@x.com").await;

    let response = app
        .request("DELETE", "/user/profile", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User profile deleted");

    let after = app.request("GET", "/user/profile", None, Some(&access)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let login = app.login("gone@x.com", "password123").await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    // The email is free again once the account is soft-deleted.
    app.register("gone@x.com").await;
}
