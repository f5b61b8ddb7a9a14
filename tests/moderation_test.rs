//! Integration tests for forum content moderation: the topic approval
//! workflow, soft deletion, reports, and closed posts.

mod common;

use common::{STRONG_PASSWORD, TestApp, unique, unique_email};
use http::StatusCode;
use serde_json::json;

async fn admin_token(app: &TestApp) -> String {
    let username = unique("admin");
    let email = unique_email("admin");
    app.register(&username, &email, STRONG_PASSWORD).await;
    app.set_role_directly(&username, "admin").await;
    app.login(&email, STRONG_PASSWORD).await
}

async fn create_category(app: &TestApp, admin: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": unique("category") })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.data()["id"].as_str().unwrap().to_string()
}

async fn create_topic(app: &TestApp, admin: &str, category_id: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/topics",
            Some(json!({ "title": unique("topic"), "category_id": category_id })),
            Some(admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.data()["id"].as_str().unwrap().to_string()
}

async fn create_post(app: &TestApp, token: &str, topic_id: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({
                "title": unique("post"),
                "content": "Some content",
                "topic_id": topic_id,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_topic_approval_promotes_requester_to_moderator() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;

    // Bob files a topic creation request.
    let response = app
        .request(
            "POST",
            "/api/topics/request",
            Some(json!({ "title": unique("topic"), "category_id": category_id })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let topic_id = response.data()["id"].as_str().unwrap().to_string();

    // Pending requests are invisible in the public listing.
    let listing = app.request("GET", "/api/topics", None, None).await;
    let listed: Vec<&str> = listing.data()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["id"].as_str())
        .collect();
    assert!(!listed.contains(&topic_id.as_str()));

    // A non-admin cannot approve.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/approve"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Admin approval installs Bob as author+moderator and promotes him —
    // one transaction over both entities.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/approve"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["user"]["role"].as_str().unwrap(), "moderator");
    assert!(response.data()["topic"]["requested_by"].is_null());

    // Bob's profile reflects the promotion.
    let me = app.request("GET", "/api/users/me", None, Some(&bob)).await;
    assert_eq!(me.data()["role"].as_str().unwrap(), "moderator");
}

#[tokio::test]
async fn test_closed_post_rejects_comments() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;

    let post_id = create_post(&app, &bob, &topic_id).await;

    // Commenting works while the post is open.
    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "post_id": post_id, "content": "First!" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    // The author closes their own post.
    let response = app
        .request(
            "POST",
            &format!("/api/posts/{post_id}/close"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // No further comments.
    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "post_id": post_id, "content": "Too late" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_stranger_cannot_close_or_delete_post() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let author_name = unique("author");
    let author_email = unique_email("author");
    app.register(&author_name, &author_email, STRONG_PASSWORD).await;
    let author = app.login(&author_email, STRONG_PASSWORD).await;
    let post_id = create_post(&app, &author, &topic_id).await;

    let stranger_name = unique("stranger");
    let stranger_email = unique_email("stranger");
    app.register(&stranger_name, &stranger_email, STRONG_PASSWORD).await;
    let stranger = app.login(&stranger_email, STRONG_PASSWORD).await;

    for (method, path) in [
        ("POST", format!("/api/posts/{post_id}/close")),
        ("DELETE", format!("/api/posts/{post_id}/soft")),
        ("DELETE", format!("/api/posts/{post_id}/hard")),
    ] {
        let response = app.request(method, &path, None, Some(&stranger)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{method} {path}");
    }
}

#[tokio::test]
async fn test_soft_deleted_post_reads_as_absent() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;
    let post_id = create_post(&app, &bob, &topic_id).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}/soft"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Reads treat the soft-deleted post as missing.
    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // And so does commenting.
    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "post_id": post_id, "content": "anyone there?" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_deduplication() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;
    let post_id = create_post(&app, &bob, &topic_id).await;

    // Two reports from the same user count once.
    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                &format!("/api/posts/{post_id}/report"),
                None,
                Some(&bob),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(response.data()["reports"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_comment_hard_delete_requires_moderator() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let author_name = unique("author");
    let author_email = unique_email("author");
    app.register(&author_name, &author_email, STRONG_PASSWORD).await;
    let author = app.login(&author_email, STRONG_PASSWORD).await;
    let post_id = create_post(&app, &author, &topic_id).await;

    let response = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({ "post_id": post_id, "content": "a comment" })),
            Some(&author),
        )
        .await;
    let comment_id = response.data()["id"].as_str().unwrap().to_string();

    // Even the author cannot hard-delete; that is a moderator action.
    let response = app
        .request(
            "DELETE",
            &format!("/api/comments/{comment_id}/hard"),
            None,
            Some(&author),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let mod_name = unique("mod");
    let mod_email = unique_email("mod");
    app.register(&mod_name, &mod_email, STRONG_PASSWORD).await;
    app.set_role_directly(&mod_name, "moderator").await;
    let moderator = app.login(&mod_email, STRONG_PASSWORD).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/comments/{comment_id}/hard"),
            None,
            Some(&moderator),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_request_flow() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;

    // Bob proposes a new title.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/update-requests"),
            Some(json!({ "title": "A better title" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let request_id = response.data()["id"].as_str().unwrap().to_string();

    // Bob cannot approve his own request.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/update-requests/{request_id}"),
            Some(json!({ "action": "approve" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The admin approves; the edit lands on the topic.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/update-requests/{request_id}"),
            Some(json!({ "action": "approve" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"].as_str().unwrap(), "A better title");

    // Resolving the same request twice conflicts.
    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/update-requests/{request_id}"),
            Some(json!({ "action": "reject" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_request_flow() {
    let app = TestApp::new().await;
    let admin = admin_token(&app).await;
    let category_id = create_category(&app, &admin).await;
    let topic_id = create_topic(&app, &admin, &category_id).await;

    let username = unique("bob");
    let email = unique_email("bob");
    app.register(&username, &email, STRONG_PASSWORD).await;
    let bob = app.login(&email, STRONG_PASSWORD).await;

    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/delete-requests"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let request_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/topics/{topic_id}/delete-requests/{request_id}"),
            Some(json!({ "action": "approve" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The topic is gone.
    let response = app
        .request("GET", &format!("/api/topics/{topic_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
