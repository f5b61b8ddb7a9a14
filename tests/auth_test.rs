//! Integration tests for the authentication and session-token lifecycle.

mod common;

use common::{STRONG_PASSWORD, TestApp, unique, unique_email};
use http::StatusCode;

#[tokio::test]
async fn test_register_login_profile_logout_flow() {
    let app = TestApp::new().await;
    let username = unique("alice");
    let email = unique_email("alice");

    // Register and receive a token.
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    // Login again with the same credentials.
    let token = {
        let _superseded = token;
        app.login(&email, STRONG_PASSWORD).await
    };

    // Profile fetch returns the profile without any password material.
    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"].as_str().unwrap(), username);
    assert!(response.data().get("password").is_none());
    assert!(response.data().get("password_hash").is_none());

    // Logout, then the same token must be rejected.
    let response = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "email": email,
                "password": "Wrong-Password-99",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_unknown_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({
                "email": unique_email("nobody"),
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_authentication() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_transport_accepted() {
    let app = TestApp::new().await;
    let username = unique("carol");
    let email = unique_email("carol");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let response = app
        .request_with_cookie("GET", "/api/users/me", None, &token)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"].as_str().unwrap(), username);
}

#[tokio::test]
async fn test_second_login_supersedes_first() {
    let app = TestApp::new().await;
    let username = unique("dave");
    let email = unique_email("dave");
    app.register(&username, &email, STRONG_PASSWORD).await;

    let first = app.login(&email, STRONG_PASSWORD).await;
    let second = app.login(&email, STRONG_PASSWORD).await;

    // Single-active-session policy: the earlier token no longer validates.
    let response = app.request("GET", "/api/users/me", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/api/users/me", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = TestApp::new().await;
    let username = unique("erin");
    let email = unique_email("erin");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let mut tampered = token.clone();
    tampered.pop();
    tampered.push('x');

    let response = app
        .request("GET", "/api/users/me", None, Some(&tampered))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_all_invalidates_every_session() {
    let app = TestApp::new().await;
    let alice = unique("alice");
    let alice_email = unique_email("alice");
    let bob = unique("bob");
    let bob_email = unique_email("bob");

    let alice_token = app.register(&alice, &alice_email, STRONG_PASSWORD).await;
    let bob_token = app.register(&bob, &bob_email, STRONG_PASSWORD).await;

    // The shutdown sweep: every outstanding token dies, for every user.
    app.revocation.revoke_all().await.unwrap();

    let response = app
        .request("GET", "/api/users/me", None, Some(&alice_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/users/me", None, Some(&bob_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Idempotent: a second sweep succeeds and changes nothing.
    app.revocation.revoke_all().await.unwrap();
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new().await;
    let username = unique("frank");
    let email = unique_email("frank");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let response = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    // The token is dead, so a second logout is simply unauthorized —
    // and the stored state is unchanged either way.
    let response = app.request("POST", "/api/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    let username = unique("grace");
    app.register(&username, &unique_email("grace"), STRONG_PASSWORD)
        .await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": username,
                "email": unique_email("other"),
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    let email = unique_email("heidi");
    app.register(&unique("heidi"), &email, STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": unique("other"),
                "email": email,
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_weak_password_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({
                "username": unique("ivan"),
                "email": unique_email("ivan"),
                "password": "password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_password_change_and_relogin() {
    let app = TestApp::new().await;
    let username = unique("judy");
    let email = unique_email("judy");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let new_password = "Cobalt-Lantern-77";
    let response = app
        .request(
            "PATCH",
            "/api/users/me",
            Some(serde_json::json!({
                "password": { "current": STRONG_PASSWORD, "new": new_password },
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    // Old password no longer works, new one does.
    let response = app
        .request(
            "POST",
            "/api/login",
            Some(serde_json::json!({ "email": email, "password": STRONG_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.login(&email, new_password).await;
}

#[tokio::test]
async fn test_password_change_requires_current_password() {
    let app = TestApp::new().await;
    let username = unique("kate");
    let email = unique_email("kate");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let response = app
        .request(
            "PATCH",
            "/api/users/me",
            Some(serde_json::json!({
                "password": { "current": "Wrong-Guess-11", "new": "Cobalt-Lantern-77" },
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_account_deletion_cascades_tokens() {
    let app = TestApp::new().await;
    let username = unique("leo");
    let email = unique_email("leo");
    let token = app.register(&username, &email, STRONG_PASSWORD).await;

    let response = app.request("DELETE", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    // The token's owning collection is gone, so it cannot authenticate.
    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
