//! Connection setup, migrations and destructive schema reset for PostgreSQL.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

/// Embedded migrations from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Bounds how long a query waits for a free connection.
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    /// Extra connection attempts made at startup before giving up.
    pub connect_retries: usize,
}

/// Opens a connection pool, retrying with exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once all retries are spent.
pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(Some(settings.idle_timeout))
        .max_lifetime(Some(settings.max_lifetime));

    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(settings.connect_retries);

    let pool = Retry::start(strategy, || {
        let options = options.clone();
        async move {
            options
                .connect(database_url)
                .await
                .inspect_err(|e| warn!("Database connection attempt failed: {}", e))
        }
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

/// Brings the schema up to date, optionally wiping it first.
///
/// With `reset` set, the `links` table and the migration history are dropped
/// and every migration is applied again. All stored links are lost.
///
/// # Errors
///
/// Returns an error if the reset statements or a migration fail.
pub async fn prepare(pool: &PgPool, reset: bool) -> Result<()> {
    if reset {
        warn!("Resetting database schema, all links will be deleted");
        reset_schema(pool).await?;
    }

    MIGRATOR
        .run(pool)
        .await
        .context("Failed to apply migrations")?;

    info!("Database schema is up to date");
    Ok(())
}

async fn reset_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(
        r#"
        DROP TABLE IF EXISTS links;
        DROP TABLE IF EXISTS _sqlx_migrations;
        "#,
    )
    .execute(pool)
    .await
    .context("Database reset failed")?;

    info!("Database reset successfully");
    Ok(())
}
