//! CLI administration tool for golink.
//!
//! Provides commands for creating and inspecting links and performing
//! database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL directly against the database
//! cargo run --bin admin -- link create https://example.com/some/long/path
//!
//! # Look up a short code
//! cargo run --bin admin -- link show ab12cd
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Drop and recreate the schema (asks for confirmation)
//! cargo run --bin admin -- db reset
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL`, `TEST_DATABASE_URL`,
//! `PUBLIC_BASE_URL`, `SHORT_CODE_LENGTH`, ...). The admin tool only works against
//! the PostgreSQL backend.

use golink::application::services::LinkService;
use golink::config::{Config, RunMode, StorageBackend, load_from_env, mask_connection_string};
use golink::infrastructure::persistence::{PgLinkRepository, schema};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing golink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database to operate on (defaults to APP_MODE)
    #[arg(long, value_enum, global = true)]
    mode: Option<RunMode>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create and inspect links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// Absolute http(s) URL to shorten
        url: String,
    },

    /// Show the link stored under a short code
    Show {
        /// Short code to look up
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Drop all links and re-apply migrations
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env(cli.mode, false, false)?;

    if config.storage_backend == StorageBackend::Memory {
        bail!("The admin tool requires STORAGE_BACKEND=postgres");
    }

    let database_url = config
        .active_database_url()
        .with_context(|| format!("No database configured for {} mode", config.mode))?
        .to_string();

    let pool = schema::connect(&database_url, &config.pool_settings()).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

/// Dispatches link commands through the same service the server uses.
async fn handle_link_action(action: LinkAction, config: &Config, pool: PgPool) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(repo, config.link_settings()?);

    match action {
        LinkAction::Create { url } => {
            println!("{}", "🔗 Create Link".bright_blue().bold());
            println!();

            let link = service
                .shorten(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!();
            print_link(&link);
        }
        LinkAction::Show { code } => {
            let link = service
                .get_link_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            print_link(&link);
        }
    }

    Ok(())
}

fn print_link(link: &golink::domain::entities::Link) {
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Code:      {}", link.short_code.cyan());
    println!("  Short URL: {}", link.short_url.bright_yellow().bold());
    println!("  Long URL:  {}", link.long_url.bright_white());
    println!();
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic and maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  Database:   {}", mask_connection_string(database_url).cyan());
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
        DbAction::Reset { yes } => {
            println!("{}", "🧨 Reset Database".bright_blue().bold());
            println!();
            println!("  Database: {}", mask_connection_string(database_url).cyan());
            println!();
            println!(
                "{}",
                "⚠️  All links will be permanently deleted.".red().bold()
            );
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Reset this database?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            schema::prepare(pool, true).await?;

            println!("{}", "✅ Database reset successfully!".green().bold());
            println!();
        }
    }

    Ok(())
}
