//! API route configuration.

use crate::api::handlers::{
    health_handler, missing_code_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link routes.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create a short link
/// - `GET  {prefix}/{code}`   - Follow a short link (permanent redirect)
/// - `GET  {prefix}`          - Empty code, answered with 400
/// - `GET  /health`           - Store health check
pub fn link_routes(route_prefix: &str) -> Router<AppState> {
    let router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route(&format!("{}/{{code}}", route_prefix), get(redirect_handler))
        .route("/health", get(health_handler));

    // With an empty prefix `/` belongs to the index page.
    if route_prefix.is_empty() {
        return router;
    }

    router
        .route(route_prefix, get(missing_code_handler))
        .route(&format!("{}/", route_prefix), get(missing_code_handler))
}
