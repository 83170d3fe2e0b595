//! Recent-trades use case.

use std::sync::Arc;

use crate::application::ports::{SubgraphError, SubgraphPort, TransferQuery};
use crate::domain::market::{TRADE_OVERFETCH_FACTOR, Trade, group_trades};

/// Trades returned when the caller does not ask for a count.
pub const DEFAULT_TRADE_LIMIT: usize = 30;

/// Use case for the grouped recent-trade list of one item.
pub struct GetTradesUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetTradesUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetTradesUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Return up to `limit` recent trades for `item_id`.
    ///
    /// Over-fetches [`TRADE_OVERFETCH_FACTOR`]` * limit` raw transfers
    /// to compensate for grouping collapse; when collapse is heavier
    /// than that, the result holds fewer than `limit` trades even
    /// though more exist upstream.
    pub async fn execute(&self, item_id: &str, limit: usize) -> Result<Vec<Trade>, SubgraphError> {
        let raw_limit = limit.saturating_mul(TRADE_OVERFETCH_FACTOR);
        let transfers = self
            .subgraph
            .transfers(TransferQuery::most_recent(item_id, raw_limit))
            .await?;

        Ok(group_trades(&transfers, limit))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::market::{Balance, Listing, Transfer};

    struct Recorded {
        transfers: Vec<Transfer>,
        seen_limit: std::sync::Mutex<Option<usize>>,
    }

    #[async_trait]
    impl SubgraphPort for Recorded {
        async fn item_ids(&self) -> Result<Vec<String>, SubgraphError> {
            Ok(vec![])
        }

        async fn transfers(&self, query: TransferQuery) -> Result<Vec<Transfer>, SubgraphError> {
            *self.seen_limit.lock().unwrap() = query.limit;
            let mut transfers = self.transfers.clone();
            transfers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            if let Some(limit) = query.limit {
                transfers.truncate(limit);
            }
            Ok(transfers)
        }

        async fn listings(&self, _item_id: &str) -> Result<Vec<Listing>, SubgraphError> {
            Ok(vec![])
        }

        async fn balance(
            &self,
            _user: &str,
            _item_id: &str,
        ) -> Result<Option<Balance>, SubgraphError> {
            Ok(None)
        }
    }

    fn transfer(tx: &str, ts: i64) -> Transfer {
        Transfer {
            item_id: "axe".to_string(),
            tx_hash: tx.to_string(),
            timestamp: ts,
            unit_price_eth: dec!(0.01),
            quantity: 1,
            total_value_eth: dec!(0.01),
            recipient: "0xbuyer".to_string(),
        }
    }

    #[tokio::test]
    async fn over_fetches_three_times_the_requested_limit() {
        let subgraph = Arc::new(Recorded {
            transfers: (0..10).map(|i| transfer(&format!("0x{i}"), i)).collect(),
            seen_limit: std::sync::Mutex::new(None),
        });
        let use_case = GetTradesUseCase::new(Arc::clone(&subgraph));

        let trades = use_case.execute("axe", 4).await.unwrap();

        assert_eq!(*subgraph.seen_limit.lock().unwrap(), Some(12));
        assert_eq!(trades.len(), 4);
        // Newest first.
        assert!(trades.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
