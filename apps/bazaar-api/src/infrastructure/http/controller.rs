//! HTTP Controller (Driver Adapter)
//!
//! Axum-based read-only API that delegates to application use cases.
//! Every handler converts failures into a generic `500 {"error": ...}`
//! via [`ApiError`]; missing entities come back as JSON `null`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Path, Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde::Deserialize;

use crate::application::ports::{ExchangeRatePort, ItemMetadataPort, SubgraphPort};
use crate::application::use_cases::{
    DEFAULT_TRADE_LIMIT, GetBalanceUseCase, GetChartDataUseCase, GetItemDetailsUseCase,
    GetItemStatsUseCase, GetMarketStatsUseCase, GetOrderBookUseCase, GetTimeframeDataUseCase,
    GetTradesUseCase, ListItemsUseCase,
};
use crate::domain::market::{ItemDetails, Timeframe};
use crate::observability;

use super::error::ApiError;
use super::response::{
    BalanceResponse, ChartPointResponse, EthPriceResponse, HealthResponse, ItemStatsResponse,
    OrderBookLevelResponse, TimeframeDataResponse, TradeResponse,
};

/// Application state shared across handlers.
pub struct AppState<S, M, X>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    /// Item index use case.
    pub items: Arc<ListItemsUseCase<S>>,
    /// Metadata proxy use case.
    pub item_details: Arc<GetItemDetailsUseCase<M>>,
    /// Per-item stats use case.
    pub item_stats: Arc<GetItemStatsUseCase<S>>,
    /// Market-wide stats use case.
    pub market_stats: Arc<GetMarketStatsUseCase<S>>,
    /// Chart series use case.
    pub chart_data: Arc<GetChartDataUseCase<S>>,
    /// Timeframe bucket use case.
    pub timeframe_data: Arc<GetTimeframeDataUseCase<S>>,
    /// Order-book use case.
    pub order_book: Arc<GetOrderBookUseCase<S>>,
    /// Recent-trades use case.
    pub trades: Arc<GetTradesUseCase<S>>,
    /// Balance lookup use case.
    pub balance: Arc<GetBalanceUseCase<S>>,
    /// ETH/USD rate adapter.
    pub exchange_rate: Arc<X>,
    /// Application version.
    pub version: String,
}

impl<S, M, X> Clone for AppState<S, M, X>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            item_details: Arc::clone(&self.item_details),
            item_stats: Arc::clone(&self.item_stats),
            market_stats: Arc::clone(&self.market_stats),
            chart_data: Arc::clone(&self.chart_data),
            timeframe_data: Arc::clone(&self.timeframe_data),
            order_book: Arc::clone(&self.order_book),
            trades: Arc::clone(&self.trades),
            balance: Arc::clone(&self.balance),
            exchange_rate: Arc::clone(&self.exchange_rate),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, M, X>(state: AppState<S, M, X>) -> Router
where
    S: SubgraphPort + 'static,
    M: ItemMetadataPort + 'static,
    X: ExchangeRatePort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/items", get(list_items))
        .route("/api/item-details", get(item_details))
        .route("/api/stats", get(market_stats))
        .route("/api/stats/{item_id}", get(item_stats))
        .route("/api/chart-data/{item_id}", get(chart_data))
        .route("/api/orderbook/{item_id}", get(order_book))
        .route("/api/trades/{item_id}", get(trades))
        .route("/api/timeframe-data/{item_id}", get(timeframe_data))
        .route("/api/balance/{user_address}/{item_id}", get(balance))
        .route("/api/eth-price", get(eth_price))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Record request count and latency per matched route.
async fn track_metrics(request: Request, next: Next) -> Response {
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |path| path.as_str().to_string(),
    );

    let start = Instant::now();
    let response = next.run(request).await;

    observability::record_api_request(
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}

/// Health check endpoint.
async fn health_check<S, M, X>(State(state): State<AppState<S, M, X>>) -> Json<HealthResponse>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// List every tradeable item identifier.
async fn list_items<S, M, X>(
    State(state): State<AppState<S, M, X>>,
) -> Result<Json<Vec<String>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    Ok(Json(state.items.execute().await?))
}

/// Query parameters for the metadata proxy.
#[derive(Debug, Deserialize)]
struct ItemDetailsParams {
    #[serde(rename = "itemId")]
    item_id: Option<String>,
}

/// Proxy one item's metadata from the game API.
async fn item_details<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Query(params): Query<ItemDetailsParams>,
) -> Result<Json<Option<ItemDetails>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let item_id = params
        .item_id
        .ok_or_else(|| ApiError::missing_param("itemId"))?;

    Ok(Json(state.item_details.execute(&item_id).await?))
}

/// 24h stats for every item.
async fn market_stats<S, M, X>(
    State(state): State<AppState<S, M, X>>,
) -> Result<Json<Vec<ItemStatsResponse>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let stats = state.market_stats.execute().await?;
    Ok(Json(stats.into_iter().map(Into::into).collect()))
}

/// 24h stats for one item.
async fn item_stats<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemStatsResponse>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let stats = state.item_stats.execute(&item_id).await?;
    Ok(Json(stats.into()))
}

/// Query parameters for the chart series.
#[derive(Debug, Deserialize)]
struct ChartParams {
    /// Accepted for API compatibility; the series is not filtered by
    /// it, the charting library windows client-side.
    #[serde(rename = "timeframe")]
    _timeframe: Option<String>,
}

/// Full price/volume series for one item.
async fn chart_data<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path(item_id): Path<String>,
    Query(_params): Query<ChartParams>,
) -> Result<Json<Vec<ChartPointResponse>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let series = state.chart_data.execute(&item_id).await?;
    Ok(Json(series.into_iter().map(Into::into).collect()))
}

/// Aggregated order book for one item.
async fn order_book<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path(item_id): Path<String>,
) -> Result<Json<Vec<OrderBookLevelResponse>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let book = state.order_book.execute(&item_id).await?;
    Ok(Json(book.into_iter().map(Into::into).collect()))
}

/// Query parameters for the trade list.
///
/// Values deserialize as strings and are parsed in the handler so a
/// malformed value surfaces as the JSON error body rather than a
/// plain-text extractor rejection.
#[derive(Debug, Deserialize)]
struct TradesParams {
    limit: Option<String>,
}

/// Grouped recent trades for one item.
async fn trades<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path(item_id): Path<String>,
    Query(params): Query<TradesParams>,
) -> Result<Json<Vec<TradeResponse>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let limit = match params.limit {
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::invalid_param("limit", &raw))?,
        None => DEFAULT_TRADE_LIMIT,
    };
    let trades = state.trades.execute(&item_id, limit).await?;
    Ok(Json(trades.into_iter().map(Into::into).collect()))
}

/// Query parameters for the timeframe bucket.
///
/// `timestamp` deserializes as a string and is parsed in the handler
/// so a malformed value surfaces as the JSON error body rather than a
/// plain-text extractor rejection.
#[derive(Debug, Deserialize)]
struct TimeframeParams {
    timeframe: Option<String>,
    timestamp: Option<String>,
}

/// Bucketed activity for one item over one interval.
async fn timeframe_data<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path(item_id): Path<String>,
    Query(params): Query<TimeframeParams>,
) -> Result<Json<TimeframeDataResponse>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let raw_start = params
        .timestamp
        .ok_or_else(|| ApiError::missing_param("timestamp"))?;
    let start: i64 = raw_start
        .parse()
        .map_err(|_| ApiError::invalid_param("timestamp", &raw_start))?;
    let timeframe = Timeframe::parse(params.timeframe.as_deref().unwrap_or("1d"));

    let bucket = state
        .timeframe_data
        .execute(&item_id, timeframe, start)
        .await?;
    Ok(Json(bucket.into()))
}

/// One user's position in one item.
async fn balance<S, M, X>(
    State(state): State<AppState<S, M, X>>,
    Path((user_address, item_id)): Path<(String, String)>,
) -> Result<Json<Option<BalanceResponse>>, ApiError>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    let balance = state.balance.execute(&user_address, &item_id).await?;
    Ok(Json(balance.map(Into::into)))
}

/// ETH/USD spot rate (falls back to a hardcoded rate upstream).
async fn eth_price<S, M, X>(State(state): State<AppState<S, M, X>>) -> Json<EthPriceResponse>
where
    S: SubgraphPort,
    M: ItemMetadataPort,
    X: ExchangeRatePort,
{
    Json(EthPriceResponse {
        usd: state.exchange_rate.eth_usd().await,
    })
}
