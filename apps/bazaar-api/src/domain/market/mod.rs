//! Market domain - value types and per-request aggregation.
//!
//! Everything in this module is pure: raw records in, derived
//! aggregates out. All I/O lives behind application ports.

pub mod chart;
pub mod orderbook;
pub mod stats;
pub mod trades;
mod types;

pub use chart::{ChartPoint, TimeframeBucket, chart_series, timeframe_bucket};
pub use orderbook::{MAX_ORDER_BOOK_DEPTH, OrderBookLevel, aggregate_order_book};
pub use stats::{ItemStats, compute_item_stats, percentage_change};
pub use trades::{TRADE_OVERFETCH_FACTOR, Trade, group_trades};
pub use types::{Balance, ItemDetails, Listing, Timeframe, Transfer};
