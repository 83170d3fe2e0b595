//! HTTP facade - axum router, handlers and response DTOs.

mod controller;
mod error;
mod response;

pub use controller::{AppState, create_router};
pub use error::{ApiError, ErrorResponse};
pub use response::{
    BalanceResponse, ChartPointResponse, EthPriceResponse, HealthResponse, ItemStatsResponse,
    OrderBookLevelResponse, TimeframeDataResponse, TradeResponse,
};
