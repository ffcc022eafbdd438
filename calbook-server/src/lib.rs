//! HTTP server for calbook.

pub mod auth;
pub mod config;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::router())
        .merge(routes::resources::router())
        .merge(routes::health::router())
        .with_state(state)
        .layer(cors)
}
