//! Order-book aggregation of active listings into price levels.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Listing;

/// Maximum number of price levels returned (best offers first).
pub const MAX_ORDER_BOOK_DEPTH: usize = 100;

/// One order-book row: all listings at one exact price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Asking price per unit in ETH.
    pub unit_price_eth: Decimal,
    /// Total units available at this price.
    pub quantity: u64,
    /// Number of listings contributing to this level.
    pub listing_count: usize,
}

/// Group listings by exact unit price into ascending price levels.
///
/// Output is strictly ascending by price and truncated to the
/// [`MAX_ORDER_BOOK_DEPTH`] lowest prices. The grouping is a strict
/// partition of the kept price range: quantities are summed, never
/// dropped or double-counted.
#[must_use]
pub fn aggregate_order_book(listings: &[Listing]) -> Vec<OrderBookLevel> {
    // BTreeMap keyed by price yields ascending order for free.
    let mut levels: BTreeMap<Decimal, OrderBookLevel> = BTreeMap::new();

    for listing in listings {
        levels
            .entry(listing.unit_price_eth)
            .and_modify(|level| {
                level.quantity += listing.remaining_quantity;
                level.listing_count += 1;
            })
            .or_insert_with(|| OrderBookLevel {
                unit_price_eth: listing.unit_price_eth,
                quantity: listing.remaining_quantity,
                listing_count: 1,
            });
    }

    let mut book: Vec<OrderBookLevel> = levels.into_values().collect();
    book.truncate(MAX_ORDER_BOOK_DEPTH);
    book
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn listing(price: Decimal, qty: u64) -> Listing {
        Listing {
            item_id: "shield".to_string(),
            unit_price_eth: price,
            remaining_quantity: qty,
            owner: "0xseller".to_string(),
        }
    }

    #[test]
    fn listings_at_same_price_merge_into_one_level() {
        let listings = vec![
            listing(dec!(0.05), 2),
            listing(dec!(0.05), 3),
            listing(dec!(0.07), 1),
        ];

        let book = aggregate_order_book(&listings);

        assert_eq!(book.len(), 2);
        assert_eq!(book[0].unit_price_eth, dec!(0.05));
        assert_eq!(book[0].quantity, 5);
        assert_eq!(book[0].listing_count, 2);
        assert_eq!(book[1].listing_count, 1);
    }

    #[test]
    fn levels_are_strictly_ascending_by_price() {
        let listings = vec![
            listing(dec!(0.09), 1),
            listing(dec!(0.03), 1),
            listing(dec!(0.06), 1),
        ];

        let book = aggregate_order_book(&listings);
        let prices: Vec<Decimal> = book.iter().map(|l| l.unit_price_eth).collect();

        assert_eq!(prices, vec![dec!(0.03), dec!(0.06), dec!(0.09)]);
    }

    #[test]
    fn book_truncates_to_max_depth_keeping_lowest_prices() {
        let listings: Vec<Listing> = (0..150)
            .map(|i| listing(Decimal::new(i + 1, 4), 1))
            .collect();

        let book = aggregate_order_book(&listings);

        assert_eq!(book.len(), MAX_ORDER_BOOK_DEPTH);
        assert_eq!(book[0].unit_price_eth, Decimal::new(1, 4));
        assert_eq!(
            book.last().map(|l| l.unit_price_eth),
            Some(Decimal::new(100, 4))
        );
    }

    #[test]
    fn aggregation_preserves_total_quantity() {
        let listings = vec![
            listing(dec!(0.05), 2),
            listing(dec!(0.05), 3),
            listing(dec!(0.07), 4),
        ];

        let input_qty: u64 = listings.iter().map(|l| l.remaining_quantity).sum();
        let book = aggregate_order_book(&listings);
        let level_qty: u64 = book.iter().map(|l| l.quantity).sum();

        assert_eq!(input_qty, level_qty);
    }

    #[test]
    fn empty_listings_yield_empty_book() {
        assert!(aggregate_order_book(&[]).is_empty());
    }
}
