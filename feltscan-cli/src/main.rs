//! feltscan
//!
//! Crawls Starknet contract events into a JSON-lines stream and decodes them
//! with built-in event schemas.

mod commands;
mod config;
mod shutdown;

use clap::{Parser, Subcommand};
use commands::events::EventsArgs;
use commands::find_deployment::FindDeploymentArgs;
use commands::parse::ParseArgs;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// feltscan - Starknet contract event crawler
#[derive(Parser, Debug)]
#[command(name = "feltscan")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl contract events and write them to stdout as JSON lines
    Events(EventsArgs),
    /// Find the block at which a contract was deployed
    FindDeploymentBlock(FindDeploymentArgs),
    /// Decode UNKNOWN events of a JSON-lines stream
    Parse(ParseArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::debug!("Starting feltscan v{}", env!("CARGO_PKG_VERSION"));

    let result = match args.command {
        Command::Events(args) => commands::events::run(args).await,
        Command::FindDeploymentBlock(args) => commands::find_deployment::run(args).await,
        Command::Parse(args) => commands::parse::run(args).await,
    };

    result.map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr; stdout carries the event stream.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
