//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, LinkSettings};
use crate::domain::repositories::LinkRepository;

/// State cloned into each request.
///
/// Everything in here is built once at startup from the immutable
/// [`crate::config::Config`]; handlers never read configuration themselves.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Path under which short links are served, e.g. `/go`.
    pub route_prefix: String,
}

impl AppState {
    /// Creates application state around a link service.
    pub fn new(link_service: Arc<LinkService>, route_prefix: impl Into<String>) -> Self {
        Self {
            link_service,
            route_prefix: route_prefix.into(),
        }
    }

    /// Convenience constructor wiring a service directly onto a repository.
    pub fn from_repository(
        repository: Arc<dyn LinkRepository>,
        settings: LinkSettings,
        route_prefix: impl Into<String>,
    ) -> Self {
        Self::new(
            Arc::new(LinkService::new(repository, settings)),
            route_prefix,
        )
    }
}
