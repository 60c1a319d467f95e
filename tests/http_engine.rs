use httpmock::prelude::*;
use serde_json::json;
use url::Url;

use networth_api::models::{NetworthOptions, NetworthRequest};
use networth_api::services::networth::{HttpNetworthEngine, NetworthEngine, NetworthError};

fn engine_for(server: &MockServer) -> HttpNetworthEngine {
    HttpNetworthEngine::new(Url::parse(&server.base_url()).unwrap()).unwrap()
}

fn full_request() -> NetworthRequest {
    NetworthRequest {
        profile: Some(json!({"items": []})),
        bank: Some(json!({"purse": 0})),
        museum_data: Some(json!({})),
    }
}

#[tokio::test]
async fn posts_payload_and_passes_result_through() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/networth").json_body(json!({
                "profile": {"items": []},
                "bank": {"purse": 0},
                "museumData": {},
                "options": {}
            }));
            then.status(200)
                .json_body(json!({"total": 0, "types": {"purse": 0}}));
        })
        .await;

    let engine = engine_for(&server);
    let result = engine
        .compute(&full_request(), &NetworthOptions::default())
        .await
        .unwrap();

    assert_eq!(result, json!({"total": 0, "types": {"purse": 0}}));
    mock.assert_async().await;
}

#[tokio::test]
async fn absent_fields_are_omitted_from_the_wire_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/networth")
                .json_body(json!({"options": {}}));
            then.status(200).json_body(json!({"total": 0}));
        })
        .await;

    let engine = engine_for(&server);
    let empty = NetworthRequest {
        profile: None,
        bank: None,
        museum_data: None,
    };
    engine
        .compute(&empty, &NetworthOptions::default())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn upstream_rejection_keeps_its_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/networth");
            then.status(400)
                .json_body(json!({"message": "profile is required"}));
        })
        .await;

    let engine = engine_for(&server);
    let err = engine
        .compute(&full_request(), &NetworthOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworthError::Validation(_)));
    assert_eq!(err.to_string(), "profile is required");
}

#[tokio::test]
async fn plain_text_error_bodies_are_taken_verbatim() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/networth");
            then.status(500).body("price source unreachable");
        })
        .await;

    let engine = engine_for(&server);
    let err = engine
        .compute(&full_request(), &NetworthOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworthError::Computation(_)));
    assert_eq!(err.to_string(), "price source unreachable");
}

#[tokio::test]
async fn messageless_failure_falls_back_to_the_stock_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/networth");
            then.status(500);
        })
        .await;

    let engine = engine_for(&server);
    let err = engine
        .compute(&full_request(), &NetworthOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to compute networth");
}

#[tokio::test]
async fn unreachable_service_surfaces_as_transport_error() {
    // Discard port, nothing listens there.
    let engine = HttpNetworthEngine::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();

    let err = engine
        .compute(&full_request(), &NetworthOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworthError::Unreachable(_)));
    assert!(err.to_string().starts_with("valuation service unreachable"));
}
