use assert_matches::assert_matches;
use feltscan_sdk::Felt;
use feltscan_sdk::client::{ClientError, StarknetRpcClient};
use feltscan_sdk::objects::rpc::EventFilter;
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> StarknetRpcClient {
    StarknetRpcClient::new(server.base_url().parse().unwrap())
}

#[tokio::test]
async fn block_number() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).body_contains("starknet_blockNumber");
            then.status(200)
                .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": 654321 }));
        })
        .await;

    let head = client_for(&server).block_number().await.unwrap();

    mock.assert_async().await;
    assert_eq!(head, 654321);
}

#[tokio::test]
async fn class_hash_at_maps_contract_not_found_to_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("starknet_getClassHashAt")
                .body_contains(r#""block_number":10"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": 20, "message": "Contract not found" }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("starknet_getClassHashAt")
                .body_contains(r#""block_number":20"#);
            then.status(200)
                .json_body(json!({ "jsonrpc": "2.0", "id": 2, "result": "0xc1a55" }));
        })
        .await;

    let client = client_for(&server);
    let address = Felt::from(0xabc);

    assert_eq!(client.class_hash_at(address, 10).await.unwrap(), None);
    assert_eq!(
        client.class_hash_at(address, 20).await.unwrap(),
        Some(Felt::from(0xc1a55))
    );
}

#[tokio::test]
async fn events_page_with_continuation_token() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("starknet_getEvents")
                .body_contains(r#""chunk_size":2"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "events": [
                        {
                            "from_address": "0xabc",
                            "keys": ["0x99cd8bde557814842a3121e8ddfd433a539b8c9f14bf31ebf108d12e6196e9"],
                            "data": ["0x1", "0x2", "0x3"],
                            "block_hash": "0xb1",
                            "block_number": 7,
                            "transaction_hash": "0x71"
                        },
                        {
                            "from_address": "0xabc",
                            "keys": ["0x5"],
                            "data": [],
                            "block_hash": "0xb2",
                            "block_number": 8,
                            "transaction_hash": "0x72"
                        }
                    ],
                    "continuation_token": "8-1"
                }
            }));
        })
        .await;

    let filter = EventFilter::all_events(0, 100, Some(Felt::from(0xabc)), 2, None);
    let chunk = client_for(&server).events(&filter).await.unwrap();

    assert_eq!(chunk.events.len(), 2);
    assert_eq!(chunk.events[0].data.len(), 3);
    assert_eq!(chunk.events[1].block_number, Some(8));
    assert_eq!(chunk.continuation_token.as_deref(), Some("8-1"));
}

#[tokio::test]
async fn rpc_errors_are_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": 33, "message": "The supplied continuation token is invalid or unknown" }
            }));
        })
        .await;

    let filter = EventFilter::all_events(0, 1, None, 10, Some("bogus".to_owned()));
    let err = client_for(&server).events(&filter).await.unwrap_err();

    assert_matches!(err, ClientError::Rpc { code: 33, .. });
}

#[tokio::test]
async fn http_errors_are_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = client_for(&server).block_number().await.unwrap_err();

    assert_matches!(err, ClientError::Api { status, body } => {
        assert_eq!(status.as_u16(), 503);
        assert_eq!(body, "upstream unavailable");
    });
}
