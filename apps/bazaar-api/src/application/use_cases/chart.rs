//! Chart series and timeframe-bucket use cases.

use std::sync::Arc;

use crate::application::ports::{SubgraphError, SubgraphPort, TransferQuery};
use crate::domain::market::{
    ChartPoint, Timeframe, TimeframeBucket, chart_series, timeframe_bucket,
};

/// Use case for one item's full price/volume series.
pub struct GetChartDataUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetChartDataUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetChartDataUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Full ascending price/volume series for `item_id`.
    ///
    /// The dashboard sends a `timeframe` parameter with this request;
    /// it is accepted and ignored for filtering, the charting library
    /// windows the series client-side.
    pub async fn execute(&self, item_id: &str) -> Result<Vec<ChartPoint>, SubgraphError> {
        let transfers = self
            .subgraph
            .transfers(TransferQuery::history(item_id))
            .await?;
        Ok(chart_series(&transfers))
    }
}

/// Use case for one bucketed interval of an item's activity.
pub struct GetTimeframeDataUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetTimeframeDataUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetTimeframeDataUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Sum `item_id` activity over `[start, start + timeframe)`.
    pub async fn execute(
        &self,
        item_id: &str,
        timeframe: Timeframe,
        start: i64,
    ) -> Result<TimeframeBucket, SubgraphError> {
        let query =
            TransferQuery::window(item_id, start, start.saturating_add(timeframe.seconds()));
        let transfers = self.subgraph.transfers(query).await?;
        Ok(timeframe_bucket(&transfers, timeframe, start))
    }
}
