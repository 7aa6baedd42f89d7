//! Wire objects shared between the crawler, the decoder and downstream
//! consumers of the JSON-lines event stream.

pub mod rpc;

use crate::felt::Felt;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Name carried by events that no registered schema recognised.
pub const EVENT_UNKNOWN: &str = "UNKNOWN";

/// A contract event exactly as it was read from the ledger.
///
/// Raw events are immutable once emitted by the crawler; ownership passes to
/// the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEvent {
    pub block_number: u64,
    pub block_hash: Felt,
    pub transaction_hash: Felt,
    pub from_address: Felt,
    /// First entry of `keys`, the event's signature hash. [`Felt::ZERO`] for
    /// keyless events.
    pub primary_key: Felt,
    pub keys: Vec<Felt>,
    pub parameters: Vec<Felt>,
}

impl From<rpc::EmittedEvent> for RawEvent {
    fn from(event: rpc::EmittedEvent) -> Self {
        Self {
            block_number: event.block_number.unwrap_or_default(),
            block_hash: event.block_hash.unwrap_or_default(),
            transaction_hash: event.transaction_hash,
            from_address: event.from_address,
            primary_key: event.keys.first().copied().unwrap_or_default(),
            keys: event.keys,
            parameters: event.data,
        }
    }
}

/// One line of the JSON-lines event stream with its payload left unparsed.
///
/// Lets a consumer route on `name` before committing to a payload type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartialEvent {
    pub name: String,
    pub event: Box<RawValue>,
}

impl PartialEvent {
    /// Wrap a raw event as an `UNKNOWN` line.
    pub fn unknown(event: &RawEvent) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: EVENT_UNKNOWN.to_owned(),
            event: serde_json::value::to_raw_value(event)?,
        })
    }

    pub fn is_unknown(&self) -> bool {
        self.name == EVENT_UNKNOWN
    }
}
