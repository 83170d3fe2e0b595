//! Order-book use case.

use std::sync::Arc;

use crate::application::ports::{SubgraphError, SubgraphPort};
use crate::domain::market::{OrderBookLevel, aggregate_order_book};

/// Use case for the aggregated order book of one item.
pub struct GetOrderBookUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetOrderBookUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetOrderBookUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Aggregate every active listing of `item_id` into price levels,
    /// best offers first.
    pub async fn execute(&self, item_id: &str) -> Result<Vec<OrderBookLevel>, SubgraphError> {
        let listings = self.subgraph.listings(item_id).await?;
        Ok(aggregate_order_book(&listings))
    }
}
