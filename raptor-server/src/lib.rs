//! HTTP adapter exposing `raptor-core`'s journey search over `GET /search`.
//!
//! Split from `main.rs` so the router itself is unit-testable with
//! `tower::ServiceExt::oneshot` without needing a bound socket.

pub mod api;
pub mod config;
pub mod dto;
pub mod snapshot;
pub mod state;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(api::search))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
