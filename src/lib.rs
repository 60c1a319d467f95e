pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Request bodies are accepted up to 20MB; anything larger is rejected by the
/// framework before the handler runs.
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/networth", post(handlers::networth::compute_networth))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
