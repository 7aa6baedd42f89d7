use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use super::ClientError;
use crate::felt::Felt;
use crate::objects::rpc::{EventFilter, EventsChunk, GetClassHashAtParams, GetEventsParams};

/// JSON-RPC error code for `CONTRACT_NOT_FOUND`.
pub const CONTRACT_NOT_FOUND: i64 = 20;

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: &'a P,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Typed HTTP client for a Starknet node's JSON-RPC endpoint.
#[derive(Debug)]
pub struct StarknetRpcClient {
    http: Client,
    url: Url,
    next_id: AtomicU64,
}

impl StarknetRpcClient {
    /// Create a new `StarknetRpcClient` for the node at `url`.
    pub fn new(url: Url) -> Self {
        Self {
            http: Client::new(),
            url,
            next_id: AtomicU64::new(1),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `starknet_blockNumber` – the number of the latest accepted block.
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        self.call("starknet_blockNumber", &[(); 0]).await
    }

    /// `starknet_getClassHashAt` – the class hash of the contract at
    /// `address` as of `block`.
    ///
    /// Returns `None` if no contract is deployed at that address yet.
    pub async fn class_hash_at(
        &self,
        address: Felt,
        block: u64,
    ) -> Result<Option<Felt>, ClientError> {
        let params = GetClassHashAtParams {
            block_id: block.into(),
            contract_address: address,
        };
        match self.call("starknet_getClassHashAt", &params).await {
            Ok(hash) => Ok(Some(hash)),
            Err(ClientError::Rpc { code, .. }) if code == CONTRACT_NOT_FOUND => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `starknet_getEvents` – one page of events matching `filter`.
    pub async fn events(&self, filter: &EventFilter) -> Result<EventsChunk, ClientError> {
        self.call("starknet_getEvents", &GetEventsParams { filter })
            .await
    }

    async fn call<P, T>(&self, method: &'static str, params: &P) -> Result<T, ClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        trace!(id, method, "Sending JSON-RPC request");

        let resp = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let response: RpcResponse<T> = serde_json::from_slice(&bytes)?;
        match (response.result, response.error) {
            (_, Some(error)) => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::MissingResult { method }),
        }
    }
}
