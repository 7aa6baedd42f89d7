//! Event channel factories and handles.
//!
//! The poller owns the sender half; dropping it closes the stream and tells
//! the consumer the crawl is over.

use feltscan_sdk::RawEvent;
use tokio::sync::mpsc;

/// Default buffer size for event channels.
///
/// A full buffer blocks the poller until the consumer catches up.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for crawled raw events.
pub type RawEventSender = mpsc::Sender<RawEvent>;
/// Receiver handle for crawled raw events.
pub type RawEventReceiver = mpsc::Receiver<RawEvent>;

/// Create a new raw event channel.
pub fn raw_event_channel() -> (RawEventSender, RawEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
