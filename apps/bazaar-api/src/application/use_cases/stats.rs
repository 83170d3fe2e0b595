//! 24h statistics use cases, per item and market-wide.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use crate::application::ports::{SubgraphError, SubgraphPort, TransferQuery};
use crate::domain::market::stats::WINDOW_SECS;
use crate::domain::market::{ItemStats, compute_item_stats};

/// Number of per-item stat computations in flight at once for the
/// market-wide endpoint. Bounds outstanding requests against the
/// index.
pub const STATS_BATCH_SIZE: usize = 5;

/// Fetch the last 48h of transfers for one item and derive its stats.
async fn stats_for_item<S: SubgraphPort>(
    subgraph: &S,
    item_id: &str,
    now: i64,
) -> Result<ItemStats, SubgraphError> {
    // One fetch covers both the current and the previous window.
    let query = TransferQuery::window(item_id, now - 2 * WINDOW_SECS, now);
    let transfers = subgraph.transfers(query).await?;
    Ok(compute_item_stats(item_id, &transfers, now))
}

/// Use case for one item's 24h statistics.
pub struct GetItemStatsUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetItemStatsUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetItemStatsUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Compute 24h stats for `item_id` as of now.
    pub async fn execute(&self, item_id: &str) -> Result<ItemStats, SubgraphError> {
        stats_for_item(self.subgraph.as_ref(), item_id, Utc::now().timestamp()).await
    }
}

/// Use case for 24h statistics across every item.
pub struct GetMarketStatsUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetMarketStatsUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetMarketStatsUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Compute stats for every item, [`STATS_BATCH_SIZE`] at a time.
    ///
    /// Items within a batch run concurrently; batches run
    /// sequentially. Any item failing fails the whole operation, in
    /// line with the no-partial-results contract of the fetch layer.
    pub async fn execute(&self) -> Result<Vec<ItemStats>, SubgraphError> {
        let item_ids = self.subgraph.item_ids().await?;
        let now = Utc::now().timestamp();

        let mut all_stats = Vec::with_capacity(item_ids.len());
        for batch in item_ids.chunks(STATS_BATCH_SIZE) {
            let results = join_all(
                batch
                    .iter()
                    .map(|item_id| stats_for_item(self.subgraph.as_ref(), item_id, now)),
            )
            .await;

            for result in results {
                all_stats.push(result?);
            }
        }

        Ok(all_stats)
    }
}
