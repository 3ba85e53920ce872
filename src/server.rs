//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, schema preparation and the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository, schema};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL pool or in-memory)
/// - Schema migrations, with an optional destructive reset
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Short code settings are invalid
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let settings = config.link_settings()?;
    let repository = open_store(&config).await?;

    match settings.generator.code_space() {
        Some(space) => info!("Short code space: {} codes", space),
        None => info!("Short code space exceeds u128"),
    }

    let state = AppState::from_repository(repository, settings, config.route_prefix());
    let app = app_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Opens the configured link store.
///
/// For PostgreSQL this connects (with retries), applies migrations and, when
/// requested, resets the schema first. Any failure here is fatal.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the schema cannot be prepared.
pub async fn open_store(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .active_database_url()
                .with_context(|| format!("No database configured for {} mode", config.mode))?;

            let pool = schema::connect(database_url, &config.pool_settings()).await?;
            info!("Connected to database");

            schema::prepare(&pool, config.reset_store).await?;

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            if config.reset_store {
                info!("Reset requested; the in-memory store always starts empty");
            }
            warn!("Using in-memory link store, links will be lost on shutdown");

            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
