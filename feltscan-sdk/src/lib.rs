#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Shared types for feltscan: the Starknet field element, the raw event
//! wire format, and (with the `client` feature) a JSON-RPC node client.

#[cfg(feature = "client")]
pub mod client;
pub mod felt;
pub mod objects;

pub use felt::{Felt, FeltParseError};
pub use objects::{EVENT_UNKNOWN, PartialEvent, RawEvent};
