//! End-to-end tests: axum router wired to real adapters against
//! mocked upstreams.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bazaar_api::application::use_cases::{
    GetBalanceUseCase, GetChartDataUseCase, GetItemDetailsUseCase, GetItemStatsUseCase,
    GetMarketStatsUseCase, GetOrderBookUseCase, GetTimeframeDataUseCase, GetTradesUseCase,
    ListItemsUseCase,
};
use bazaar_api::infrastructure::http::{AppState, create_router};
use bazaar_api::{EthPriceClient, ItemApiClient, SubgraphClient};
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Nothing listens on port 1.
const DEAD: &str = "http://127.0.0.1:1";

fn build_router(subgraph_url: &str, item_api_url: &str, eth_price_url: &str) -> Router {
    let subgraph = Arc::new(SubgraphClient::new(subgraph_url, TIMEOUT).unwrap());
    let metadata = Arc::new(ItemApiClient::new(item_api_url, TIMEOUT).unwrap());
    let exchange_rate = Arc::new(EthPriceClient::new(eth_price_url, TIMEOUT).unwrap());

    create_router(AppState {
        items: Arc::new(ListItemsUseCase::new(Arc::clone(&subgraph))),
        item_details: Arc::new(GetItemDetailsUseCase::new(metadata)),
        item_stats: Arc::new(GetItemStatsUseCase::new(Arc::clone(&subgraph))),
        market_stats: Arc::new(GetMarketStatsUseCase::new(Arc::clone(&subgraph))),
        chart_data: Arc::new(GetChartDataUseCase::new(Arc::clone(&subgraph))),
        timeframe_data: Arc::new(GetTimeframeDataUseCase::new(Arc::clone(&subgraph))),
        order_book: Arc::new(GetOrderBookUseCase::new(Arc::clone(&subgraph))),
        trades: Arc::new(GetTradesUseCase::new(Arc::clone(&subgraph))),
        balance: Arc::new(GetBalanceUseCase::new(subgraph)),
        exchange_rate,
        version: "e2e".to_string(),
    })
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&body).unwrap();
    (status, value)
}

fn as_decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn transfer_row(ts: i64, price: &str, qty: u64, total: &str) -> Value {
    json!({
        "item": { "id": "sword" },
        "txHash": format!("0x{ts}"),
        "timestamp": ts.to_string(),
        "unitPriceEth": price,
        "quantity": qty.to_string(),
        "totalValueEth": total,
        "recipient": "0xbuyer"
    })
}

#[tokio::test]
async fn stats_with_cold_previous_window_reports_zero_volume_change() {
    let subgraph = MockServer::start().await;
    let now = Utc::now().timestamp();

    // Activity only inside the current 24h window.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "transfers": [
                transfer_row(now - 600, "0.01", 2, "0.02"),
                transfer_row(now - 300, "0.02", 1, "0.02"),
            ]}
        })))
        .mount(&subgraph)
        .await;

    let router = build_router(&subgraph.uri(), DEAD, DEAD);
    let (status, body) = get_json(router, "/api/stats/sword").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemId"], "sword");
    assert_eq!(as_decimal(&body["volume24h"]), dec!(0.04));
    assert_eq!(body["itemsSold24h"], 3);
    // Zero previous-window volume is defined as zero change, never
    // infinity.
    assert_eq!(as_decimal(&body["volumeChange24h"]), Decimal::ZERO);
    // First price 0.01, last 0.02: +100%.
    assert_eq!(as_decimal(&body["priceChange24h"]), dec!(100));
}

#[tokio::test]
async fn unreachable_subgraph_yields_500_error_body() {
    let router = build_router(DEAD, DEAD, DEAD);
    let (status, body) = get_json(router, "/api/orderbook/sword").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn item_details_proxies_the_game_api() {
    let game_api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/sword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Iron Sword",
            "image": "https://img.example/sword.png",
            "type": "weapon"
        })))
        .mount(&game_api)
        .await;

    let router = build_router(DEAD, &game_api.uri(), DEAD);
    let (status, body) = get_json(router, "/api/item-details?itemId=sword").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Iron Sword");
    assert_eq!(body["type"], "weapon");
}

#[tokio::test]
async fn unknown_item_details_is_null() {
    let game_api = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&game_api)
        .await;

    let router = build_router(DEAD, &game_api.uri(), DEAD);
    let (status, body) = get_json(router, "/api/item-details?itemId=nothing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn eth_price_falls_back_when_upstream_is_down() {
    let router = build_router(DEAD, DEAD, DEAD);
    let (status, body) = get_json(router, "/api/eth-price").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&body["usd"]), dec!(2500));
}

#[tokio::test]
async fn trades_endpoint_groups_and_truncates() {
    let subgraph = MockServer::start().await;
    // The first two rows share tx hash, price, and buyer.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "transfers": [
                transfer_row(5000, "0.01", 2, "0.02"),
                transfer_row(5000, "0.01", 3, "0.03"),
                transfer_row(4000, "0.02", 1, "0.02"),
            ]}
        })))
        .mount(&subgraph)
        .await;

    let router = build_router(&subgraph.uri(), DEAD, DEAD);
    let (status, body) = get_json(router, "/api/trades/sword?limit=1").await;

    assert_eq!(status, StatusCode::OK);
    let trades = body.as_array().unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0]["quantity"], 5);
    assert_eq!(as_decimal(&trades[0]["ethSpent"]), dec!(0.05));
    assert_eq!(trades[0]["tradeCount"], 2);
}

#[tokio::test]
async fn timeframe_data_buckets_one_interval() {
    let subgraph = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "transfers": [
                transfer_row(1000, "0.01", 2, "0.02"),
                transfer_row(1500, "0.01", 1, "0.01"),
            ]}
        })))
        .mount(&subgraph)
        .await;

    let router = build_router(&subgraph.uri(), DEAD, DEAD);
    let (status, body) =
        get_json(router, "/api/timeframe-data/sword?timeframe=1h&timestamp=1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timeframe"], "1h");
    assert_eq!(body["timestamp"], 1000);
    assert_eq!(as_decimal(&body["volume"]), dec!(0.03));
    assert_eq!(body["itemsSold"], 3);
}
