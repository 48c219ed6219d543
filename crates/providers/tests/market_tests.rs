// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `MarketClient` against a mocked HTTP endpoint

use std::time::Duration;

use provider_client::ProviderError;
use providers::{MarketClient, MarketConfig};
use query_params::{CoinId, VsCurrency};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

mod fixtures;
use fixtures::*;

fn test_client(mock_server: &MockServer) -> MarketClient {
    MarketClient::new(MarketConfig::default_test(&mock_server.uri())).expect("client builds")
}

#[tokio::test]
async fn spot_price_reads_the_nested_quote() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "ethereum"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ethereum": { "usd": 3521.07 }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let quote = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap();
    assert_eq!(quote.coin, CoinId::ETHEREUM);
    assert_eq!(quote.currency, VsCurrency::USD);
    assert!((quote.amount - 3521.07).abs() < f64::EPSILON);
}

#[tokio::test]
async fn non_default_pair_is_forwarded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "eur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bitcoin": { "eur": 61250.0 }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let coin = CoinId::parse("bitcoin").unwrap();
    let currency = VsCurrency::parse("eur").unwrap();
    let quote = client.spot_price(coin, currency).await.unwrap();
    assert!((quote.amount - 61250.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_coin_key_maps_to_unknown_symbol() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    match err {
        ProviderError::UnknownSymbol { symbol } => assert_eq!(symbol, "ethereum"),
        other => panic!("expected UnknownSymbol, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_currency_key_maps_to_unknown_symbol() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ethereum": {}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    match err {
        ProviderError::UnknownSymbol { symbol } => assert_eq!(symbol, "usd"),
        other => panic!("expected UnknownSymbol, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_body_maps_to_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(429).set_body_json(market_rate_limited()))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    match err {
        ProviderError::Rejected { message } => {
            assert!(message.contains("Rate Limit"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_without_body_maps_to_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn garbage_success_body_maps_to_protocol_mismatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ProtocolMismatch { .. }));
}

#[tokio::test]
async fn non_positive_price_maps_to_protocol_mismatch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ethereum": { "usd": 0.0 }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ProtocolMismatch { .. }));
}

#[tokio::test]
async fn timeout_maps_to_retryable_unavailable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ethereum": { "usd": 1.0 } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = MarketConfig::default_test(&mock_server.uri());
    config.timeout_seconds = 1;
    let client = MarketClient::new(config).expect("client builds");

    let err = client
        .spot_price(CoinId::ETHEREUM, VsCurrency::USD)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
    assert!(err.is_retryable());
}
