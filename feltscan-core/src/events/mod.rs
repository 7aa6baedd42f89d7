//! Hand-off of crawled events from the poller to its consumer.

pub mod channels;

pub use channels::{DEFAULT_CHANNEL_BUFFER, RawEventReceiver, RawEventSender, raw_event_channel};
