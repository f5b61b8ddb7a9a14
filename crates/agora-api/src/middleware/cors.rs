//! CORS layer construction.

use tower_http::cors::{Any, CorsLayer};

/// Builds a permissive CORS layer.
///
/// The API is cookie-authenticated behind a same-origin frontend in
/// production; the permissive layer covers local development clients.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}
