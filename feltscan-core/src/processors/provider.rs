//! The ledger query capability consumed by the locator and the poller.

use async_trait::async_trait;
use feltscan_sdk::client::{ClientError, StarknetRpcClient};
use feltscan_sdk::objects::rpc::EventFilter;
use feltscan_sdk::{Felt, RawEvent};
use thiserror::Error;

/// Errors that can occur while querying the ledger.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The node client failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Any other provider failure.
    #[error("provider error: {0}")]
    Other(String),
}

/// One bounded, paginated event query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    pub from_block: u64,
    pub to_block: u64,
    /// Contract filter; `None` matches every emitter.
    pub address: Option<Felt>,
    pub page_size: u64,
    /// Opaque token from the previous page of the same range.
    pub continuation_token: Option<String>,
}

/// One page of events, in ledger order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    /// Present when more pages remain for the same range.
    pub continuation_token: Option<String>,
}

/// Read access to a block-structured ledger.
///
/// The transport is up to the implementation; only this capability set
/// matters to the crawler.
#[async_trait]
pub trait LedgerProvider: Send + Sync {
    /// Number of the current chain head.
    async fn block_number(&self) -> Result<u64, ProviderError>;

    /// Whether `address` has code deployed as of `block`.
    async fn has_code_at(&self, address: Felt, block: u64) -> Result<bool, ProviderError>;

    /// Fetch one page of events matching `query`.
    async fn events(&self, query: &EventsQuery) -> Result<EventsPage, ProviderError>;
}

#[async_trait]
impl LedgerProvider for StarknetRpcClient {
    async fn block_number(&self) -> Result<u64, ProviderError> {
        Ok(StarknetRpcClient::block_number(self).await?)
    }

    async fn has_code_at(&self, address: Felt, block: u64) -> Result<bool, ProviderError> {
        Ok(self.class_hash_at(address, block).await?.is_some())
    }

    async fn events(&self, query: &EventsQuery) -> Result<EventsPage, ProviderError> {
        let filter = EventFilter::all_events(
            query.from_block,
            query.to_block,
            query.address,
            query.page_size,
            query.continuation_token.clone(),
        );
        let chunk = StarknetRpcClient::events(self, &filter).await?;
        Ok(EventsPage {
            events: chunk.events.into_iter().map(RawEvent::from).collect(),
            // Some nodes send an empty string on the last page.
            continuation_token: chunk.continuation_token.filter(|t| !t.is_empty()),
        })
    }
}
