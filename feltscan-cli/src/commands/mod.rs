//! Subcommand implementations.

pub mod events;
pub mod find_deployment;
pub mod parse;

use feltscan_core::decoding::{EventSchemaRegistry, ParsedEvent};
use feltscan_sdk::RawEvent;

/// Renders one JSON line for a crawled event, newline included.
///
/// With a registry the event is decoded first; a decode failure is logged
/// and the event is written as `UNKNOWN`.
pub fn event_line(
    registry: Option<&EventSchemaRegistry>,
    event: RawEvent,
) -> serde_json::Result<Vec<u8>> {
    let parsed = match registry {
        Some(registry) => registry.parse(event).unwrap_or_else(|failure| {
            tracing::warn!(
                event = failure.name,
                error = %failure.source,
                "Failed to decode event, passing it through"
            );
            failure.passthrough
        }),
        None => ParsedEvent::Unknown(event),
    };
    let mut line = serde_json::to_vec(&parsed)?;
    line.push(b'\n');
    Ok(line)
}
