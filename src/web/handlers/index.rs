//! Index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the shortening form.
///
/// The form posts to `/shorten` from `public/index.js`, served under `/static`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub app_name: &'static str,
    pub version: &'static str,
}

/// Renders the index page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        app_name: "golink",
        version: env!("CARGO_PKG_VERSION"),
    }
}
