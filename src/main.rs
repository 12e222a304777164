//! sablier-admin entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Hash the admin password
//! 3. Connect to MongoDB
//! 4. Build router with the login gate in front of every route
//! 5. Serve until Ctrl-C / SIGTERM, then close the MongoDB client

use sablier_admin::{
    auth::{AppState, Credential, TokenService},
    config::Config,
    routes, storage,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    // RUST_LOG overrides; info otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::from_env().expect("Failed to load config");
    config.warn_insecure_defaults();
    tracing::info!("Starting sablier-admin on {}", config.bind_addr);

    let credential = Credential::new(&config.admin_username, &config.admin_password)
        .expect("Failed to hash admin password");
    // Only the hash is needed from here on; the old value is zeroized on drop
    config.admin_password = Zeroizing::new(String::new());
    tracing::info!("Admin user '{}' configured", credential.username());

    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_secs);

    let (client, db) = storage::connect(&config.mongodb_uri, &config.mongodb_db)
        .await
        .expect("Failed to connect to MongoDB");

    let bind_addr = config.bind_addr;
    let state = AppState {
        db,
        config: Arc::new(config),
        credential: Arc::new(credential),
        tokens: Arc::new(tokens),
    };

    let app = routes::app_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    client.shutdown().await;
    tracing::info!("MongoDB client closed");
}
