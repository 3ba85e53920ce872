use clap::Parser;
use golink::config::{RunMode, load_from_env};
use golink::server;
use tracing_subscriber::EnvFilter;

/// URL shortening service.
#[derive(Parser)]
#[command(name = "golink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database to serve from (overrides APP_MODE)
    #[arg(long, value_enum)]
    mode: Option<RunMode>,

    /// Drop all stored links and re-apply migrations before serving
    #[arg(long)]
    reset: bool,

    /// Listen on 127.0.0.1 instead of all interfaces
    #[arg(long)]
    localhost: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env(cli.mode, cli.reset, cli.localhost)?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
