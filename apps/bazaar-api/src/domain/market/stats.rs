//! Per-item 24h statistics over a transfer window.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::Transfer;

/// Seconds in one statistics window.
pub const WINDOW_SECS: i64 = 24 * 60 * 60;

/// Derived 24h metrics for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Item identifier.
    pub item_id: String,
    /// Summed ETH value of the current 24h window.
    pub volume_24h_eth: Decimal,
    /// Summed units sold in the current 24h window.
    pub items_sold_24h: u64,
    /// Highest transfer price in the current window.
    pub high_24h: Option<Decimal>,
    /// Lowest transfer price in the current window.
    pub low_24h: Option<Decimal>,
    /// Most recent transfer price in the current window.
    pub last_price: Option<Decimal>,
    /// Price change vs. the start of the current window, percent.
    pub price_change_24h: Decimal,
    /// Volume change vs. the previous 24h window, percent.
    pub volume_change_24h: Decimal,
}

/// Percentage change from `previous` to `current`.
///
/// Defined as exactly `0` when `previous` is zero. That is not a true
/// rate, it just keeps a cold previous window from rendering as
/// infinity on the dashboard.
#[must_use]
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    (current - previous) / previous * dec!(100)
}

/// Compute 24h stats for one item from its last-48h transfers.
///
/// `transfers` may arrive in any order; the windows are
/// `[now - 24h, now)` (current) and `[now - 48h, now - 24h)`
/// (previous). Price change compares the chronologically first and
/// last transfer inside the current window rather than a calendar
/// open/close.
#[must_use]
pub fn compute_item_stats(item_id: &str, transfers: &[Transfer], now: i64) -> ItemStats {
    let current_start = now - WINDOW_SECS;
    let previous_start = now - 2 * WINDOW_SECS;

    let mut current: Vec<&Transfer> = transfers
        .iter()
        .filter(|t| t.timestamp >= current_start && t.timestamp < now)
        .collect();
    current.sort_by_key(|t| t.timestamp);

    let volume_24h_eth: Decimal = current.iter().map(|t| t.total_value_eth).sum();
    let items_sold_24h: u64 = current.iter().map(|t| t.quantity).sum();

    let previous_volume: Decimal = transfers
        .iter()
        .filter(|t| t.timestamp >= previous_start && t.timestamp < current_start)
        .map(|t| t.total_value_eth)
        .sum();

    let high_24h = current.iter().map(|t| t.unit_price_eth).max();
    let low_24h = current.iter().map(|t| t.unit_price_eth).min();

    let open_price = current.first().map(|t| t.unit_price_eth);
    let last_price = current.last().map(|t| t.unit_price_eth);

    let price_change_24h = match (open_price, last_price) {
        (Some(open), Some(last)) => percentage_change(last, open),
        _ => Decimal::ZERO,
    };

    ItemStats {
        item_id: item_id.to_string(),
        volume_24h_eth,
        items_sold_24h,
        high_24h,
        low_24h,
        last_price,
        price_change_24h,
        volume_change_24h: percentage_change(volume_24h_eth, previous_volume),
    }
}
