//! Integration tests for role-based access control.

mod common;

use common::{STRONG_PASSWORD, TestApp, unique, unique_email};
use http::StatusCode;

/// Registers a user, promotes them to the given role, and returns a token
/// issued *after* the promotion so the role is current.
async fn user_with_role(app: &TestApp, prefix: &str, role: &str) -> String {
    let username = unique(prefix);
    let email = unique_email(prefix);
    app.register(&username, &email, STRONG_PASSWORD).await;
    app.set_role_directly(&username, role).await;
    app.login(&email, STRONG_PASSWORD).await
}

#[tokio::test]
async fn test_category_management_is_admin_only() {
    let app = TestApp::new().await;
    let admin_token = user_with_role(&app, "admin", "admin").await;
    let user_token = user_with_role(&app, "bob", "user").await;

    // Non-admin creation is forbidden.
    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": unique("general") })),
            Some(&user_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Admin creates a category.
    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": unique("general") })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let category_id = response.data()["id"].as_str().unwrap().to_string();

    // Non-admin deletion is forbidden; admin deletion succeeds.
    let response = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            None,
            Some(&user_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The category is gone.
    let response = app
        .request(
            "GET",
            &format!("/api/categories/{category_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let app = TestApp::new().await;
    let admin_token = user_with_role(&app, "admin", "admin").await;
    let user_token = user_with_role(&app, "bob", "user").await;

    let response = app.request("GET", "/api/users", None, Some(&user_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/users", None, Some(&admin_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["items"].is_array());
}

#[tokio::test]
async fn test_moderator_is_not_admin() {
    let app = TestApp::new().await;
    let moderator_token = user_with_role(&app, "mod", "moderator").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": unique("general") })),
            Some(&moderator_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_assigns_role_by_fiat() {
    let app = TestApp::new().await;
    let admin_token = user_with_role(&app, "admin", "admin").await;

    let username = unique("mallory");
    let email = unique_email("mallory");
    app.register(&username, &email, STRONG_PASSWORD).await;

    // Look the user up through the admin listing to get their ID.
    let login = app.login(&email, STRONG_PASSWORD).await;
    let me = app.request("GET", "/api/users/me", None, Some(&login)).await;
    let user_id = me.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(serde_json::json!({ "role": "moderator" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["role"].as_str().unwrap(), "moderator");

    // A non-admin cannot assign roles.
    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(serde_json::json!({ "role": "admin" })),
            Some(&login),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_forbidden_is_distinct_from_unauthorized() {
    let app = TestApp::new().await;
    let user_token = user_with_role(&app, "bob", "user").await;

    // Authenticated but underprivileged: 403.
    let response = app.request("GET", "/api/users", None, Some(&user_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Unauthenticated: 401.
    let response = app.request("GET", "/api/users", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
