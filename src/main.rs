//! Agora Server — discussion forum backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use agora_core::config::AppConfig;
use agora_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("AGORA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Agora v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = agora_database::connection::create_pool(&config.database).await?;
    agora_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(agora_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let token_repo = Arc::new(agora_database::repositories::token::TokenRepository::new(
        db_pool.clone(),
    ));
    let category_repo = Arc::new(
        agora_database::repositories::category::CategoryRepository::new(db_pool.clone()),
    );
    let topic_repo = Arc::new(agora_database::repositories::topic::TopicRepository::new(
        db_pool.clone(),
    ));
    let post_repo = Arc::new(agora_database::repositories::post::PostRepository::new(
        db_pool.clone(),
    ));
    let comment_repo = Arc::new(
        agora_database::repositories::comment::CommentRepository::new(db_pool.clone()),
    );

    // ── Step 3: Auth system ──────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let password_hasher = Arc::new(agora_auth::password::PasswordHasher::new());
    let password_policy = Arc::new(agora_auth::password::PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(agora_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(agora_auth::jwt::JwtDecoder::new(&config.auth));
    let token_issuer = Arc::new(agora_auth::session::TokenIssuer::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&token_repo),
    ));
    let token_validator = Arc::new(agora_auth::session::TokenValidator::new(
        Arc::clone(&jwt_decoder),
        Arc::clone(&token_repo),
        Arc::clone(&user_repo),
    ));
    let revocation = Arc::new(agora_auth::session::RevocationManager::new(Arc::clone(
        &token_repo,
    )));
    let gate = Arc::new(agora_auth::access::AccessGate::new());

    // ── Step 4: Services ─────────────────────────────────────────
    let user_service = Arc::new(agora_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
        Arc::clone(&token_issuer),
        Arc::clone(&revocation),
        Arc::clone(&gate),
    ));
    let category_service = Arc::new(agora_service::category::CategoryService::new(
        Arc::clone(&category_repo),
        Arc::clone(&gate),
    ));
    let topic_service = Arc::new(agora_service::topic::TopicService::new(
        Arc::clone(&topic_repo),
        Arc::clone(&category_repo),
        Arc::clone(&gate),
    ));
    let post_service = Arc::new(agora_service::post::PostService::new(
        Arc::clone(&post_repo),
        Arc::clone(&topic_repo),
        Arc::clone(&gate),
    ));
    let comment_service = Arc::new(agora_service::comment::CommentService::new(
        Arc::clone(&comment_repo),
        Arc::clone(&post_repo),
        Arc::clone(&gate),
    ));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app_state = agora_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        token_validator: Arc::clone(&token_validator),
        user_service,
        category_service,
        topic_service,
        post_service,
        comment_service,
    };

    let app = agora_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Agora server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Revoke all outstanding tokens before exit ────────
    // Best-effort with a bounded grace period: a failure is logged but
    // never blocks the exit further.
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    match tokio::time::timeout(grace, revocation.revoke_all()).await {
        Ok(Ok(count)) => {
            tracing::info!(revoked = count, "Shutdown revocation sweep complete");
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Shutdown revocation sweep failed");
        }
        Err(_) => {
            tracing::error!(
                grace_seconds = config.server.shutdown_grace_seconds,
                "Shutdown revocation sweep timed out"
            );
        }
    }

    db_pool.close().await;

    tracing::info!("Agora server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
