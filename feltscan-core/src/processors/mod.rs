//! Processors that read from the ledger.
//!
//! - `LedgerProvider`: the query capability both processors depend on
//! - `deployment_locator`: finds where a crawl should start
//! - `EventPoller`: crawls events onto a `RawEvent` stream

pub mod deployment_locator;
pub mod event_poller;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;

pub use deployment_locator::{LocateError, deployment_block, find_deployment_block};
pub use event_poller::{CrawlCursor, CrawlOutcome, EventPoller, PollError, PollStep};
pub use provider::{EventsPage, EventsQuery, LedgerProvider, ProviderError};
