//! Starknet JSON-RPC objects used by the crawler.
//!
//! Only the subset of the node API the crawler needs: the chain head, class
//! hash lookups for deployment detection, and paginated event queries.

use crate::felt::Felt;
use serde::{Deserialize, Serialize};

/// Block selector accepted by Starknet JSON-RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockId {
    Number { block_number: u64 },
    Tag(BlockTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Latest,
    Pending,
}

impl From<u64> for BlockId {
    fn from(block_number: u64) -> Self {
        BlockId::Number { block_number }
    }
}

/// Filter and page request of `starknet_getEvents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventFilter {
    pub from_block: BlockId,
    pub to_block: BlockId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Felt>,
    /// Key prefix filter. `[[]]` matches any primary key.
    pub keys: Vec<Vec<Felt>>,
    pub chunk_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

impl EventFilter {
    /// Matches every event in `[from_block, to_block]`, optionally restricted
    /// to one emitting contract.
    pub fn all_events(
        from_block: u64,
        to_block: u64,
        address: Option<Felt>,
        chunk_size: u64,
        continuation_token: Option<String>,
    ) -> Self {
        Self {
            from_block: from_block.into(),
            to_block: to_block.into(),
            address,
            keys: vec![vec![]],
            chunk_size,
            continuation_token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetEventsParams<'a> {
    pub filter: &'a EventFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetClassHashAtParams {
    pub block_id: BlockId,
    pub contract_address: Felt,
}

/// An event as returned by `starknet_getEvents`.
///
/// Block fields are absent for events from the pending block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmittedEvent {
    pub from_address: Felt,
    #[serde(default)]
    pub keys: Vec<Felt>,
    #[serde(default)]
    pub data: Vec<Felt>,
    #[serde(default)]
    pub block_hash: Option<Felt>,
    #[serde(default)]
    pub block_number: Option<u64>,
    pub transaction_hash: Felt,
}

/// One page of `starknet_getEvents` results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventsChunk {
    pub events: Vec<EmittedEvent>,
    /// Present (and non-empty) when more pages remain for the same filter.
    #[serde(default)]
    pub continuation_token: Option<String>,
}
