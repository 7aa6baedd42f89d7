//! In-memory ledger used by processor tests.

use super::provider::{EventsPage, EventsQuery, LedgerProvider, ProviderError};
use async_trait::async_trait;
use feltscan_sdk::{Felt, RawEvent};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers queries from a script: successive chain heads (the last one
/// repeats) and a queue of event pages (an empty page once drained).
/// Every event query is recorded.
pub struct ScriptedProvider {
    heads: Mutex<VecDeque<u64>>,
    deployed_at: Option<u64>,
    pages: Mutex<VecDeque<Result<EventsPage, ProviderError>>>,
    queries: Mutex<Vec<EventsQuery>>,
    head_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(head: u64) -> Self {
        Self {
            heads: Mutex::new(VecDeque::from([head])),
            deployed_at: None,
            pages: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            head_calls: AtomicUsize::new(0),
        }
    }

    pub fn deployed_at(mut self, block: u64) -> Self {
        self.deployed_at = Some(block);
        self
    }

    pub fn with_heads(self, heads: impl IntoIterator<Item = u64>) -> Self {
        *self.heads.lock().unwrap() = heads.into_iter().collect();
        self
    }

    pub fn push_page(&self, events: Vec<RawEvent>, continuation_token: Option<&str>) {
        self.pages.lock().unwrap().push_back(Ok(EventsPage {
            events,
            continuation_token: continuation_token.map(str::to_owned),
        }));
    }

    pub fn push_error(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(ProviderError::Other(message.to_owned())));
    }

    pub fn queries(&self) -> Vec<EventsQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerProvider for ScriptedProvider {
    async fn block_number(&self) -> Result<u64, ProviderError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        let mut heads = self.heads.lock().unwrap();
        let head = if heads.len() > 1 {
            heads.pop_front()
        } else {
            heads.front().copied()
        };
        head.ok_or_else(|| ProviderError::Other("no chain head scripted".to_owned()))
    }

    async fn has_code_at(&self, _address: Felt, block: u64) -> Result<bool, ProviderError> {
        Ok(self.deployed_at.is_some_and(|deployed| block >= deployed))
    }

    async fn events(&self, query: &EventsQuery) -> Result<EventsPage, ProviderError> {
        self.queries.lock().unwrap().push(query.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(EventsPage::default()))
    }
}

/// A raw event at `block`, distinguishable by `index`.
pub fn raw_event(block: u64, index: u64) -> RawEvent {
    RawEvent {
        block_number: block,
        block_hash: Felt::from(block),
        transaction_hash: Felt::from(index),
        from_address: Felt::from(0xc0de),
        primary_key: Felt::from(0x5157),
        keys: vec![Felt::from(0x5157)],
        parameters: vec![Felt::from(index)],
    }
}

/// `count` events spread over consecutive blocks starting at `first_block`.
pub fn raw_events(first_block: u64, count: u64) -> Vec<RawEvent> {
    (0..count).map(|i| raw_event(first_block + i, i)).collect()
}
