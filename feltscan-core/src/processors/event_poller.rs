//! EventPoller processor.
//!
//! The EventPoller is responsible for:
//! - Turning the ledger into an ordered stream of raw contract events
//! - Paginating bounded block-range queries with continuation tokens
//! - Staying `confirmations` blocks behind the chain head on open-ended crawls
//! - Adapting its polling cadence (hot/cold) to how busy the contract is
//!
//! The poller is a single sequential loop with one outstanding request at a
//! time. It owns the sender half of the output channel and drops it on every
//! exit path, which closes the stream.

use super::provider::{EventsQuery, LedgerProvider, ProviderError};
use crate::config::CrawlConfig;
use crate::events::{RawEventReceiver, RawEventSender, raw_event_channel};
use crate::utils::polling_interval::range_cadence;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Errors that abort a crawl.
#[derive(Debug, Error)]
pub enum PollError {
    /// A chain head lookup or event query failed. Not retried.
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),
}

/// How a crawl ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The shutdown signal fired (or its sender was dropped).
    Cancelled,
    /// A fixed block range was read to the end.
    Exhausted,
    /// The consumer dropped its receiver.
    ConsumerClosed,
}

/// Result of a single poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    /// No finalized blocks to read yet; wait a cold interval.
    Cold,
    /// One page was fetched and its events emitted.
    Fetched { events: usize },
    /// A fixed range has nothing left to read.
    Exhausted,
    /// The consumer went away mid-emission.
    ConsumerClosed,
}

/// The poller's mutable state. Updated exactly once per iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlCursor {
    pub from_block: u64,
    /// Upper bound of the current range; 0 while unresolved on an
    /// open-ended crawl.
    pub to_block: u64,
    /// Set while paginating; pins `from_block` and `to_block`.
    pub continuation_token: Option<String>,
    /// Delay before the next iteration.
    pub interval: Duration,
    /// Consecutive block ranges that yielded events.
    pub heat: u32,
    /// Events seen so far in the current range, across pages.
    range_events: usize,
}

impl CrawlCursor {
    fn new(config: &CrawlConfig) -> Self {
        Self {
            from_block: config.from_block,
            to_block: config.to_block,
            continuation_token: None,
            interval: config.hot_interval,
            heat: 0,
            range_events: 0,
        }
    }

    fn is_paginating(&self) -> bool {
        self.continuation_token.is_some()
    }

    /// Moves past the exhausted range and updates the cadence.
    fn advance(&mut self, config: &CrawlConfig) {
        self.from_block = self.to_block.saturating_add(1);
        self.to_block = config.to_block;
        self.continuation_token = None;
        (self.heat, self.interval) =
            range_cadence(self.heat, self.range_events > 0, self.interval, config);
        self.range_events = 0;
    }
}

/// Crawls contract events from a [`LedgerProvider`].
pub struct EventPoller {
    provider: Arc<dyn LedgerProvider>,
    config: CrawlConfig,
    cursor: CrawlCursor,
}

impl EventPoller {
    /// Create a new EventPoller starting at `config.from_block`.
    pub fn new(provider: Arc<dyn LedgerProvider>, config: CrawlConfig) -> Self {
        let cursor = CrawlCursor::new(&config);
        Self {
            provider,
            config,
            cursor,
        }
    }

    pub fn cursor(&self) -> &CrawlCursor {
        &self.cursor
    }

    /// Start the poller on its own task.
    ///
    /// Returns the event stream and a handle resolving to how the crawl ended.
    pub fn spawn(
        self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> (
        RawEventReceiver,
        JoinHandle<Result<CrawlOutcome, PollError>>,
    ) {
        let (event_tx, event_rx) = raw_event_channel();
        let handle = tokio::spawn(self.run(event_tx, shutdown_rx));
        (event_rx, handle)
    }

    /// Run the EventPoller until the crawl ends.
    ///
    /// Each iteration waits for the current interval, then resolves the
    /// upper bound, fetches one page and updates the cursor. Cancellation is
    /// checked before every iteration's network calls.
    pub async fn run(
        mut self,
        event_tx: RawEventSender,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<CrawlOutcome, PollError> {
        info!(
            contract = ?self.config.contract,
            from_block = self.config.from_block,
            to_block = self.config.to_block,
            "EventPoller started"
        );

        loop {
            tokio::select! {
                biased;

                // Shutdown has highest priority.
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("EventPoller received shutdown signal");
                        return Ok(CrawlOutcome::Cancelled);
                    }
                    continue;
                }

                _ = tokio::time::sleep(self.cursor.interval) => {}
            }

            if *shutdown_rx.borrow() {
                info!("EventPoller received shutdown signal");
                return Ok(CrawlOutcome::Cancelled);
            }

            match self.step(&event_tx).await? {
                PollStep::Cold | PollStep::Fetched { .. } => {}
                PollStep::Exhausted => {
                    info!(
                        to_block = self.config.to_block,
                        "EventPoller finished the requested range"
                    );
                    return Ok(CrawlOutcome::Exhausted);
                }
                PollStep::ConsumerClosed => {
                    info!("Event receiver closed, stopping EventPoller");
                    return Ok(CrawlOutcome::ConsumerClosed);
                }
            }
        }
    }

    /// Perform one poll iteration without waiting.
    pub async fn step(&mut self, event_tx: &RawEventSender) -> Result<PollStep, PollError> {
        if self.cursor.to_block == 0 && !self.cursor.is_paginating() {
            let head = self.provider.block_number().await?;
            self.cursor.to_block = head.saturating_sub(self.config.confirmations);
            debug!(head, to_block = self.cursor.to_block, "Resolved crawl upper bound");
        }

        if self.cursor.to_block <= self.cursor.from_block {
            self.cursor.interval = self.config.cold_interval;
            if !self.config.is_open_ended() {
                return Ok(PollStep::Exhausted);
            }
            // Re-resolve against a fresh head next time.
            self.cursor.to_block = 0;
            debug!(from_block = self.cursor.from_block, "Crawl is cold");
            return Ok(PollStep::Cold);
        }

        let query = EventsQuery {
            from_block: self.cursor.from_block,
            to_block: self.cursor.to_block,
            address: self.config.contract,
            page_size: self.config.batch_size,
            continuation_token: self.cursor.continuation_token.clone(),
        };
        let page = self.provider.events(&query).await?;

        let events = page.events.len();
        for event in page.events {
            if event_tx.send(event).await.is_err() {
                return Ok(PollStep::ConsumerClosed);
            }
        }
        self.cursor.range_events += events;

        debug!(
            from_block = self.cursor.from_block,
            to_block = self.cursor.to_block,
            events,
            more_pages = page.continuation_token.is_some(),
            "Fetched events page"
        );

        match page.continuation_token {
            Some(token) => {
                self.cursor.continuation_token = Some(token);
                self.cursor.interval = self.config.hot_interval;
            }
            None => self.cursor.advance(&self.config),
        }

        Ok(PollStep::Fetched { events })
    }
}
