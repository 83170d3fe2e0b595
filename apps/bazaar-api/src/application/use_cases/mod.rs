//! Application Use Cases
//!
//! One struct per dashboard operation, generic over the driven ports.
//! Every use case recomputes its aggregates from the index on each
//! call; nothing is cached between requests.

mod balance;
mod chart;
mod items;
mod orderbook;
mod stats;
mod trades;

pub use balance::GetBalanceUseCase;
pub use chart::{GetChartDataUseCase, GetTimeframeDataUseCase};
pub use items::{GetItemDetailsUseCase, ListItemsUseCase};
pub use orderbook::GetOrderBookUseCase;
pub use stats::{GetItemStatsUseCase, GetMarketStatsUseCase, STATS_BATCH_SIZE};
pub use trades::{DEFAULT_TRADE_LIMIT, GetTradesUseCase};
