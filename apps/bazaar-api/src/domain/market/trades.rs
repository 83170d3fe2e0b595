//! Grouping of raw transfers into logical trades.
//!
//! A single marketplace purchase that sweeps several listings lands on
//! chain as several transfer events sharing one transaction hash. The
//! dashboard shows those as one trade per `(txHash, unitPrice,
//! recipient)` key.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Transfer;

/// Raw transfers fetched per requested trade.
///
/// Grouping collapses an unknown number of transfers into each trade,
/// so the fetch over-reads by this factor. If collapse is heavier than
/// 3:1 the result legitimately holds fewer trades than requested.
pub const TRADE_OVERFETCH_FACTOR: usize = 3;

/// A logical trade derived from one or more transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Transaction hash shared by the constituent transfers.
    pub tx_hash: String,
    /// Unix timestamp of the first constituent seen.
    pub timestamp: i64,
    /// Price per unit in ETH.
    pub unit_price_eth: Decimal,
    /// Total units across constituents.
    pub quantity: u64,
    /// Total ETH spent across constituents.
    pub eth_spent: Decimal,
    /// Buyer address.
    pub recipient: String,
    /// Number of constituent transfers.
    pub trade_count: usize,
}

/// Grouping key for one logical trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TradeKey {
    tx_hash: String,
    unit_price_eth: Decimal,
    recipient: String,
}

/// Collapse transfers into trades and keep the `limit` most recent.
///
/// Input is expected newest-first (the order the index returns it in);
/// each trade keeps the timestamp of its first-inserted constituent.
/// The grouping is a strict partition of the input: summed quantities
/// and ETH are preserved before truncation.
#[must_use]
pub fn group_trades(transfers: &[Transfer], limit: usize) -> Vec<Trade> {
    let mut groups: HashMap<TradeKey, Trade> = HashMap::new();

    for transfer in transfers {
        let key = TradeKey {
            tx_hash: transfer.tx_hash.clone(),
            unit_price_eth: transfer.unit_price_eth,
            recipient: transfer.recipient.clone(),
        };

        match groups.get_mut(&key) {
            Some(trade) => {
                trade.quantity += transfer.quantity;
                trade.eth_spent += transfer.total_value_eth;
                trade.trade_count += 1;
            }
            None => {
                groups.insert(
                    key,
                    Trade {
                        tx_hash: transfer.tx_hash.clone(),
                        timestamp: transfer.timestamp,
                        unit_price_eth: transfer.unit_price_eth,
                        quantity: transfer.quantity,
                        eth_spent: transfer.total_value_eth,
                        recipient: transfer.recipient.clone(),
                        trade_count: 1,
                    },
                );
            }
        }
    }

    let mut trades: Vec<Trade> = groups.into_values().collect();
    trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    trades.truncate(limit);
    trades
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn transfer(
        tx: &str,
        ts: i64,
        price: Decimal,
        qty: u64,
        total: Decimal,
        recipient: &str,
    ) -> Transfer {
        Transfer {
            item_id: "sword".to_string(),
            tx_hash: tx.to_string(),
            timestamp: ts,
            unit_price_eth: price,
            quantity: qty,
            total_value_eth: total,
            recipient: recipient.to_string(),
        }
    }

    #[test]
    fn same_tx_price_and_buyer_collapse_into_one_trade() {
        let transfers = vec![
            transfer("0xa", 1000, dec!(0.01), 2, dec!(0.02), "0xbuyer"),
            transfer("0xa", 1000, dec!(0.01), 3, dec!(0.03), "0xbuyer"),
        ];

        let trades = group_trades(&transfers, 30);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 5);
        assert_eq!(trades[0].eth_spent, dec!(0.05));
        assert_eq!(trades[0].trade_count, 2);
        assert_eq!(trades[0].timestamp, 1000);
    }

    #[test]
    fn different_price_in_same_tx_stays_separate() {
        let transfers = vec![
            transfer("0xa", 1000, dec!(0.01), 1, dec!(0.01), "0xbuyer"),
            transfer("0xa", 1000, dec!(0.02), 1, dec!(0.02), "0xbuyer"),
        ];

        let trades = group_trades(&transfers, 30);
        assert_eq!(trades.len(), 2);
    }

    #[test]
    fn different_buyer_in_same_tx_stays_separate() {
        let transfers = vec![
            transfer("0xa", 1000, dec!(0.01), 1, dec!(0.01), "0xalice"),
            transfer("0xa", 1000, dec!(0.01), 1, dec!(0.01), "0xbob"),
        ];

        let trades = group_trades(&transfers, 30);
        assert_eq!(trades.len(), 2);
    }

    #[test]
    fn trades_sorted_descending_and_truncated() {
        let transfers = vec![
            transfer("0xa", 100, dec!(0.01), 1, dec!(0.01), "0xbuyer"),
            transfer("0xb", 300, dec!(0.01), 1, dec!(0.01), "0xbuyer"),
            transfer("0xc", 200, dec!(0.01), 1, dec!(0.01), "0xbuyer"),
        ];

        let trades = group_trades(&transfers, 2);

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].timestamp, 300);
        assert_eq!(trades[1].timestamp, 200);
    }

    #[test]
    fn grouping_preserves_total_quantity() {
        let transfers = vec![
            transfer("0xa", 100, dec!(0.01), 2, dec!(0.02), "0xalice"),
            transfer("0xa", 100, dec!(0.01), 3, dec!(0.03), "0xalice"),
            transfer("0xb", 200, dec!(0.02), 7, dec!(0.14), "0xbob"),
        ];

        let input_qty: u64 = transfers.iter().map(|t| t.quantity).sum();
        let trades = group_trades(&transfers, usize::MAX);
        let grouped_qty: u64 = trades.iter().map(|t| t.quantity).sum();

        assert_eq!(input_qty, grouped_qty);
    }

    #[test]
    fn heavy_collapse_yields_fewer_than_limit() {
        // 6 transfers collapsing into a single trade: the result is
        // allowed to under-fill the requested limit.
        let transfers: Vec<Transfer> = (0..6)
            .map(|_| transfer("0xa", 100, dec!(0.01), 1, dec!(0.01), "0xbuyer"))
            .collect();

        let trades = group_trades(&transfers, 2);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].trade_count, 6);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_trades(&[], 30).is_empty());
    }
}
