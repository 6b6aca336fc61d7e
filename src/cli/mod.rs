pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "casting-api")]
#[command(about = "Casting agency API - actors and movies behind role-based access control")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the actor and movie tables if missing, then exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        Some(Commands::Migrate) => commands::migrate::handle().await,
        None => commands::serve::handle(Default::default()).await,
    }
}
