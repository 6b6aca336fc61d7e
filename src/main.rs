use clap::Parser;
use tracing_subscriber::EnvFilter;

use casting_api::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH0_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("casting_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    casting_api::cli::run(cli).await
}
