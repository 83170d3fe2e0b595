//! Price/volume series and single-interval bucketing for charts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Timeframe, Transfer};

/// One point of the dashboard price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Unix timestamp of the transfer.
    pub timestamp: i64,
    /// Unit price in ETH.
    pub price: Decimal,
    /// ETH value of the transfer.
    pub volume_eth: Decimal,
    /// Units moved.
    pub quantity: u64,
}

/// Summed activity over one chart interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeBucket {
    /// Interval start (unix seconds).
    pub timestamp: i64,
    /// Canonical timeframe label.
    pub timeframe: String,
    /// Summed ETH value inside the interval.
    pub volume_eth: Decimal,
    /// Summed units inside the interval.
    pub items_sold: u64,
}

/// Reshape a transfer history into chart points, ascending by time.
#[must_use]
pub fn chart_series(transfers: &[Transfer]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = transfers
        .iter()
        .map(|t| ChartPoint {
            timestamp: t.timestamp,
            price: t.unit_price_eth,
            volume_eth: t.total_value_eth,
            quantity: t.quantity,
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Sum activity over `[start, start + timeframe)`.
#[must_use]
pub fn timeframe_bucket(
    transfers: &[Transfer],
    timeframe: Timeframe,
    start: i64,
) -> TimeframeBucket {
    // The start comes straight from a query parameter; keep arbitrary
    // values from overflowing the window end.
    let end = start.saturating_add(timeframe.seconds());
    let in_window = transfers
        .iter()
        .filter(|t| t.timestamp >= start && t.timestamp < end);

    let mut volume_eth = Decimal::ZERO;
    let mut items_sold: u64 = 0;
    for transfer in in_window {
        volume_eth += transfer.total_value_eth;
        items_sold += transfer.quantity;
    }

    TimeframeBucket {
        timestamp: start,
        timeframe: timeframe.as_str().to_string(),
        volume_eth,
        items_sold,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn transfer(ts: i64, price: Decimal, qty: u64, total: Decimal) -> Transfer {
        Transfer {
            item_id: "helm".to_string(),
            tx_hash: format!("0x{ts}"),
            timestamp: ts,
            unit_price_eth: price,
            quantity: qty,
            total_value_eth: total,
            recipient: "0xbuyer".to_string(),
        }
    }

    #[test]
    fn series_is_ascending_regardless_of_input_order() {
        let transfers = vec![
            transfer(300, dec!(0.03), 1, dec!(0.03)),
            transfer(100, dec!(0.01), 1, dec!(0.01)),
            transfer(200, dec!(0.02), 1, dec!(0.02)),
        ];

        let series = chart_series(&transfers);
        let stamps: Vec<i64> = series.iter().map(|p| p.timestamp).collect();

        assert_eq!(stamps, vec![100, 200, 300]);
        assert_eq!(series[0].price, dec!(0.01));
    }

    #[test]
    fn bucket_sums_only_inside_half_open_interval() {
        let start = 1000;
        let transfers = vec![
            transfer(start, dec!(0.01), 2, dec!(0.02)),
            transfer(start + 899, dec!(0.01), 3, dec!(0.03)),
            // Exactly at the end boundary: excluded.
            transfer(start + 900, dec!(0.01), 5, dec!(0.05)),
            transfer(start - 1, dec!(0.01), 7, dec!(0.07)),
        ];

        let bucket = timeframe_bucket(&transfers, Timeframe::M15, start);

        assert_eq!(bucket.volume_eth, dec!(0.05));
        assert_eq!(bucket.items_sold, 5);
        assert_eq!(bucket.timeframe, "15m");
    }

    #[test]
    fn empty_bucket_is_zeroed() {
        let bucket = timeframe_bucket(&[], Timeframe::H1, 0);
        assert_eq!(bucket.volume_eth, Decimal::ZERO);
        assert_eq!(bucket.items_sold, 0);
    }

    #[test]
    fn bucket_near_max_timestamp_saturates_instead_of_overflowing() {
        let start = i64::MAX - 10;
        let transfers = vec![transfer(start + 5, dec!(0.01), 2, dec!(0.02))];

        let bucket = timeframe_bucket(&transfers, Timeframe::D1, start);

        assert_eq!(bucket.timestamp, start);
        assert_eq!(bucket.items_sold, 2);
    }
}
