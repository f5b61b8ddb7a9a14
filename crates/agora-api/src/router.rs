//! Route definitions for the Agora HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(category_routes())
        .merge(topic_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/logout/all", post(handlers::auth::logout_all))
}

/// User self-service and admin management.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/me", patch(handlers::user::update_profile))
        .route("/users/me", delete(handlers::user::delete_account))
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", patch(handlers::user::set_role))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Category CRUD. Mutations admin-only, reads authenticated.
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::category::list_categories))
        .route("/categories", post(handlers::category::create_category))
        .route("/categories/{id}", get(handlers::category::get_category))
        .route(
            "/categories/{id}",
            patch(handlers::category::update_category),
        )
        .route(
            "/categories/{id}",
            delete(handlers::category::delete_category),
        )
}

/// Topic CRUD plus approval and moderation request flows.
fn topic_routes() -> Router<AppState> {
    Router::new()
        .route("/topics", get(handlers::topic::list_topics))
        .route("/topics", post(handlers::topic::create_topic))
        .route("/topics/request", post(handlers::topic::request_topic))
        .route("/topics/requests", get(handlers::topic::list_pending_topics))
        .route("/topics/{id}", get(handlers::topic::get_topic))
        .route("/topics/{id}/posts", get(handlers::topic::list_topic_posts))
        .route("/topics/{id}/approve", post(handlers::topic::approve_topic))
        .route(
            "/topics/{id}/moderators",
            post(handlers::topic::add_moderator),
        )
        .route(
            "/topics/{id}/update-requests",
            post(handlers::topic::submit_update_request),
        )
        .route(
            "/topics/{id}/update-requests/{rid}",
            post(handlers::topic::resolve_update_request),
        )
        .route(
            "/topics/{id}/delete-requests",
            post(handlers::topic::submit_delete_request),
        )
        .route(
            "/topics/{id}/delete-requests/{rid}",
            post(handlers::topic::resolve_delete_request),
        )
}

/// Post CRUD, moderation flags, and reports.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(handlers::post::list_posts))
        .route("/posts", post(handlers::post::create_post))
        .route("/posts/{id}", get(handlers::post::get_post))
        .route("/posts/{id}", patch(handlers::post::update_post))
        .route(
            "/posts/{id}/comments",
            get(handlers::post::list_post_comments),
        )
        .route("/posts/{id}/soft", delete(handlers::post::soft_delete_post))
        .route("/posts/{id}/hard", delete(handlers::post::hard_delete_post))
        .route("/posts/{id}/report", post(handlers::post::report_post))
        .route("/posts/{id}/close", post(handlers::post::close_post))
}

/// Comment CRUD, moderation flags, and reports.
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(handlers::comment::list_comments))
        .route("/comments", post(handlers::comment::create_comment))
        .route("/comments/{id}", get(handlers::comment::get_comment))
        .route("/comments/{id}", patch(handlers::comment::update_comment))
        .route(
            "/comments/{id}/soft",
            delete(handlers::comment::soft_delete_comment),
        )
        .route(
            "/comments/{id}/hard",
            delete(handlers::comment::hard_delete_comment),
        )
        .route(
            "/comments/{id}/report",
            post(handlers::comment::report_comment),
        )
}

/// Liveness endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
