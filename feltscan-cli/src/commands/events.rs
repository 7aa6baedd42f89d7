use super::event_line;
use crate::config::{ConfigLoader, CrawlArgs, ProviderArgs};
use crate::shutdown::spawn_shutdown_handler;
use clap::Args;
use feltscan_core::decoding::builtin_registry;
use feltscan_core::processors::{CrawlOutcome, EventPoller, deployment_block};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

#[derive(Args, Debug)]
pub struct EventsArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,

    #[command(flatten)]
    pub crawl: CrawlArgs,

    /// Decode known events with the built-in schemas
    #[arg(long)]
    pub parse: bool,
}

/// Crawls contract events and writes them to stdout as JSON lines.
pub async fn run(args: EventsArgs) -> anyhow::Result<()> {
    let loaded = ConfigLoader::new(args.provider, args.crawl).load()?;
    let client = Arc::new(loaded.provider.client()?);
    let registry = if args.parse {
        Some(builtin_registry()?)
    } else {
        None
    };

    let mut crawl = loaded.crawl;
    if crawl.from_block == 0 {
        if let Some(contract) = crawl.contract {
            crawl.from_block = deployment_block(client.as_ref(), contract).await?;
            crawl.validate()?;
        }
    }

    tracing::info!(
        provider = %loaded.provider.url,
        from_block = crawl.from_block,
        to_block = crawl.to_block,
        "Starting event crawl"
    );

    let shutdown_rx = spawn_shutdown_handler();
    let (mut event_rx, handle) = EventPoller::new(client, crawl).spawn(shutdown_rx);

    let mut stdout = tokio::io::stdout();
    let mut written = 0u64;
    while let Some(event) = event_rx.recv().await {
        let line = event_line(registry.as_ref(), event)?;
        stdout.write_all(&line).await?;
        stdout.flush().await?;
        written += 1;
    }

    match handle.await?? {
        CrawlOutcome::Cancelled => tracing::info!(written, "Crawl cancelled"),
        CrawlOutcome::Exhausted => tracing::info!(written, "Crawl complete"),
        CrawlOutcome::ConsumerClosed => tracing::warn!(written, "Output closed before crawl ended"),
    }
    Ok(())
}
