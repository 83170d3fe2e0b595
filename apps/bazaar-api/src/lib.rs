// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Bazaar API - Market Data Facade
//!
//! Read-only backend of the game-item trading dashboard. The service
//! proxies an indexed blockchain dataset (a GraphQL subgraph) plus two
//! third-party REST APIs and reshapes their data into the JSON the
//! dashboard renders.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: pure aggregation over raw index records
//!   - trade grouping by `(txHash, unitPrice, recipient)`
//!   - order-book aggregation by exact price level
//!   - 24h window statistics and percentage changes
//!   - chart series and timeframe buckets
//!
//! - **Application**: ports and use cases
//!   - `ports`: `SubgraphPort`, `ItemMetadataPort`, `ExchangeRatePort`
//!   - `use_cases`: one struct per dashboard operation
//!
//! - **Infrastructure**: adapters
//!   - `subgraph`: paginated GraphQL client (1000-row pages)
//!   - `metadata`: game item API client
//!   - `exchange`: ETH/USD spot with hardcoded fallback
//!   - `http`: axum router and response DTOs
//!   - `config`: environment settings
//!
//! Every request recomputes its aggregates from the external index;
//! there is no cache, no persistence and no retry logic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core aggregation logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Observability - structured logging and Prometheus metrics.
pub mod observability;

// Domain re-exports
pub use domain::market::{
    Balance, ChartPoint, ItemDetails, ItemStats, Listing, OrderBookLevel, Timeframe,
    TimeframeBucket, Trade, Transfer,
};

// Application re-exports
pub use application::ports::{
    ExchangeRatePort, ItemMetadataPort, MetadataError, SubgraphError, SubgraphPort, TransferQuery,
};
pub use application::use_cases::{
    DEFAULT_TRADE_LIMIT, GetBalanceUseCase, GetChartDataUseCase, GetItemDetailsUseCase,
    GetItemStatsUseCase, GetMarketStatsUseCase, GetOrderBookUseCase, GetTimeframeDataUseCase,
    GetTradesUseCase, ListItemsUseCase, STATS_BATCH_SIZE,
};

// Infrastructure re-exports
pub use infrastructure::config::Settings;
pub use infrastructure::exchange::{EthPriceClient, FALLBACK_ETH_USD};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::metadata::ItemApiClient;
pub use infrastructure::subgraph::{PAGE_SIZE, SubgraphClient};
