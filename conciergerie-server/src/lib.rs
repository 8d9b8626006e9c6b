//! HTTP surface of the conciergerie backend.
//!
//! Routing and state assembly live here so integration tests can drive the
//! router in-memory; `main.rs` only parses arguments and binds the listener.

pub mod routes;
pub mod state;
pub mod tenant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the full API router. CORS is permissive: the planning dashboard is
/// served from a different origin.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::tasks::router())
        .merge(routes::orders::router())
        .merge(routes::houses::router())
        .merge(routes::sync::router())
        .with_state(state)
        .layer(cors)
}
