//! HTTP route handlers.

pub mod auth;
pub mod data;

use crate::auth::middleware::{require_auth, AppState};
use axum::{middleware, routing::get, routing::post, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the full application: routes, static fallback, and the gate in front of both.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        // Login (the only public path by default)
        .route(
            crate::config::LOGIN_PATH,
            get(auth::login_page).post(auth::login),
        )
        // Session endpoints
        .route("/api/logout", post(auth::logout))
        .route("/api/session", get(auth::session))
        // Catalog endpoints
        .route("/api/streams", get(data::list_streams))
        .route("/api/coins", get(data::list_coins))
        .route("/api/coins/{key}", get(data::get_coin))
        .route("/api/chains", get(data::list_chains))
        .route("/api/chains/{chain_id}", get(data::get_chain))
        // Dashboard assets
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
