//! fantasy-roster
//!
//! Extracts a structured team roster from ESPN Fantasy Football team pages
//! whose DOM renders asynchronously.

mod browser;
mod cli;
mod config;
mod extractor;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fantasy_roster=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            url,
            input,
            location,
            email,
        } => cli::run_extract(url, input, location, email).await,
    }
}
