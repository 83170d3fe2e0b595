//! HTTP response DTOs.
//!
//! The dashboard consumes camelCase field names; domain types map
//! into these at the API boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::market::{
    Balance, ChartPoint, ItemStats, OrderBookLevel, TimeframeBucket, Trade,
};

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the service answers.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// One grouped trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    /// Transaction hash.
    pub tx_hash: String,
    /// Unix timestamp of the trade.
    pub timestamp: i64,
    /// Unit price in ETH.
    pub price: Decimal,
    /// Total units.
    pub quantity: u64,
    /// Total ETH spent.
    pub eth_spent: Decimal,
    /// Buyer address.
    pub recipient: String,
    /// Constituent transfer count.
    pub trade_count: usize,
}

impl From<Trade> for TradeResponse {
    fn from(trade: Trade) -> Self {
        Self {
            tx_hash: trade.tx_hash,
            timestamp: trade.timestamp,
            price: trade.unit_price_eth,
            quantity: trade.quantity,
            eth_spent: trade.eth_spent,
            recipient: trade.recipient,
            trade_count: trade.trade_count,
        }
    }
}

/// One order-book price level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookLevelResponse {
    /// Asking price in ETH.
    pub price: Decimal,
    /// Units available at this price.
    pub quantity: u64,
    /// Listings contributing to the level.
    pub listing_count: usize,
}

impl From<OrderBookLevel> for OrderBookLevelResponse {
    fn from(level: OrderBookLevel) -> Self {
        Self {
            price: level.unit_price_eth,
            quantity: level.quantity,
            listing_count: level.listing_count,
        }
    }
}

/// Per-item 24h statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatsResponse {
    /// Item identifier.
    pub item_id: String,
    /// Summed ETH volume, current window.
    pub volume_24h: Decimal,
    /// Summed units sold, current window.
    pub items_sold_24h: u64,
    /// Highest price, current window.
    pub high_24h: Option<Decimal>,
    /// Lowest price, current window.
    pub low_24h: Option<Decimal>,
    /// Most recent price, current window.
    pub last_price: Option<Decimal>,
    /// Price change vs. window open, percent.
    pub price_change_24h: Decimal,
    /// Volume change vs. previous window, percent.
    pub volume_change_24h: Decimal,
}

impl From<ItemStats> for ItemStatsResponse {
    fn from(stats: ItemStats) -> Self {
        Self {
            item_id: stats.item_id,
            volume_24h: stats.volume_24h_eth,
            items_sold_24h: stats.items_sold_24h,
            high_24h: stats.high_24h,
            low_24h: stats.low_24h,
            last_price: stats.last_price,
            price_change_24h: stats.price_change_24h,
            volume_change_24h: stats.volume_change_24h,
        }
    }
}

/// One chart point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPointResponse {
    /// Unix timestamp.
    pub timestamp: i64,
    /// Unit price in ETH.
    pub price: Decimal,
    /// ETH value transferred.
    pub volume: Decimal,
    /// Units transferred.
    pub quantity: u64,
}

impl From<ChartPoint> for ChartPointResponse {
    fn from(point: ChartPoint) -> Self {
        Self {
            timestamp: point.timestamp,
            price: point.price,
            volume: point.volume_eth,
            quantity: point.quantity,
        }
    }
}

/// Bucketed activity over one interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeDataResponse {
    /// Interval start (unix seconds).
    pub timestamp: i64,
    /// Canonical timeframe label.
    pub timeframe: String,
    /// Summed ETH volume inside the interval.
    pub volume: Decimal,
    /// Summed units inside the interval.
    pub items_sold: u64,
}

impl From<TimeframeBucket> for TimeframeDataResponse {
    fn from(bucket: TimeframeBucket) -> Self {
        Self {
            timestamp: bucket.timestamp,
            timeframe: bucket.timeframe,
            volume: bucket.volume_eth,
            items_sold: bucket.items_sold,
        }
    }
}

/// A user's position in one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Units held.
    pub quantity: u64,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            quantity: balance.quantity,
        }
    }
}

/// ETH/USD spot rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthPriceResponse {
    /// USD per ETH.
    pub usd: Decimal,
}
