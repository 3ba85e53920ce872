//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`              - Shortening form
//! - `POST /shorten`       - Create a short link
//! - `GET  /go/{code}`     - Short link redirect (prefix configurable)
//! - `GET  /health`        - Store health check
//! - `/static/*`           - Static assets
//!
//! Unknown paths get a JSON `not_found` error.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::fallback_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds the router without path normalization.
///
/// Useful for in-process tests, where the router is driven directly.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let route_prefix = state.route_prefix.clone();

    Router::new()
        .merge(web::routes::public_routes())
        .merge(api::routes::link_routes(&route_prefix))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, static_dir: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, static_dir))
}
