//! Exchange Rate Port (Driven Port)

use async_trait::async_trait;
use rust_decimal::Decimal;

/// ETH/USD spot rate lookup.
///
/// Infallible by contract: adapters fall back to a hardcoded rate when
/// the upstream is unreachable, so the dashboard ticker always has a
/// number to show.
#[async_trait]
pub trait ExchangeRatePort: Send + Sync {
    /// Current ETH price in USD.
    async fn eth_usd(&self) -> Decimal;
}
