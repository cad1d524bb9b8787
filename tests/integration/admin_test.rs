//! Integration tests for the RBAC-guarded admin endpoints.

mod helpers;

use helpers::TestApp;
use http::StatusCode;
use serde_json::json;

fn admin_register_body(email: &str, role: &str) -> serde_json::Value {
    let mut body = TestApp::register_body(email);
    body["role"] = json!(role);
    body
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let app = TestApp::new();
    let response = app.request("GET", "/admin/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Authorization is required");
}

#[tokio::test]
async fn test_regular_user_is_forbidden() {
    let app = TestApp::new();
    let (access, _) = app.register("plain@x.com").await;

    let list = app.request("GET", "/admin/users", None, Some(&access)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
    assert_eq!(list.error(), "Forbidden");

    let register = app
        .request(
            "POST",
            "/admin/register",
            Some(admin_register_body("sneaky@x.com", "admin")),
            Some(&access),
        )
        .await;
    assert_eq!(register.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_registers_user() {
    let app = TestApp::new();
    let admin = app.admin_session("root@x.com").await;

    let response = app
        .request(
            "POST",
            "/admin/register",
            Some(admin_register_body("second@x.com", "admin")),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "admin");
    assert_eq!(response.body["password_hash"], "");

    let duplicate = app
        .request(
            "POST",
            "/admin/register",
            Some(admin_register_body("second@x.com", "user")),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    // The new admin can log in and use the admin routes.
    let login = app.login("second@x.com", "password123").await;
    let (access, _) = helpers::tokens(&login);
    let list = app.request("GET", "/admin/users", None, Some(&access)).await;
    assert_eq!(list.status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_users_paginates_and_filters() {
    let app = TestApp::new();
    let admin = app.admin_session("root@x.com").await;
    for i in 0..3 {
        app.register(&format!("user{i}@x.com")).await;
    }

    let all = app.request("GET", "/admin/users", None, Some(&admin)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["total"], 4);
    assert_eq!(all.body["page"], 1);
    assert_eq!(all.body["limit"], 10);
    for user in all.body["users"].as_array().unwrap() {
        assert_eq!(user["password_hash"], "");
    }

    let page = app
        .request("GET", "/admin/users?page=2&limit=2", None, Some(&admin))
        .await;
    assert_eq!(page.body["users"].as_array().unwrap().len(), 2);
    assert_eq!(page.body["page"], 2);

    let admins = app
        .request("GET", "/admin/users?role=admin", None, Some(&admin))
        .await;
    assert_eq!(admins.body["total"], 1);
    assert_eq!(admins.body["users"][0]["email"], "root@x.com");

    let by_email = app
        .request("GET", "/admin/users?email=USER1", None, Some(&admin))
        .await;
    assert_eq!(by_email.body["total"], 1);

    let bad = app
        .request("GET", "/admin/users?page=abc", None, Some(&admin))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_page_past_the_end() {
    let app = TestApp::new();
    let admin = app.admin_session("root@x.com").await;

    let response = app
        .request(
            "GET",
            "/admin/users?page=18446744073709551615",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["users"].as_array().unwrap().is_empty());
    assert_eq!(response.body["total"], 1);
}

#[tokio::test]
async fn test_list_users_filter_is_literal() {
    let app = TestApp::new();
    let admin = app.admin_session("root@x.com").await;
    app.register("user0@x.com").await;

    let underscore = app
        .request("GET", "/admin/users?name=_", None, Some(&admin))
        .await;
    assert_eq!(underscore.status, StatusCode::OK);
    assert_eq!(underscore.body["total"], 0);

    let percent = app
        .request("GET", "/admin/users?email=%25", None, Some(&admin))
        .await;
    assert_eq!(percent.body["total"], 0);
}
