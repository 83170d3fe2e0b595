//! Subgraph Port (Driven Port)
//!
//! Interface to the indexed blockchain dataset. Implementations are
//! expected to page through the full matching set; callers never see
//! pagination.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::market::{Balance, Listing, Transfer};

/// Errors surfaced by the subgraph adapter.
#[derive(Debug, Error)]
pub enum SubgraphError {
    /// Network or HTTP failure reaching the index.
    #[error("subgraph unreachable: {0}")]
    Upstream(String),

    /// The index answered with a populated GraphQL `errors` field.
    #[error("subgraph query failed: {0}")]
    Query(String),

    /// The index answered with a payload we could not decode.
    #[error("subgraph response malformed: {0}")]
    Decode(String),
}

/// Filters for a transfer fetch, forwarded verbatim to the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferQuery {
    /// Restrict to one item.
    pub item_id: Option<String>,
    /// Inclusive lower timestamp bound.
    pub since: Option<i64>,
    /// Exclusive upper timestamp bound.
    pub until: Option<i64>,
    /// Descending by timestamp when set; ascending otherwise.
    pub newest_first: bool,
    /// Cap on raw rows fetched. `None` pages through everything.
    pub limit: Option<usize>,
}

impl TransferQuery {
    /// Full ascending history for one item.
    #[must_use]
    pub fn history(item_id: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            ..Self::default()
        }
    }

    /// The `limit` most recent transfers for one item.
    #[must_use]
    pub fn most_recent(item_id: impl Into<String>, limit: usize) -> Self {
        Self {
            item_id: Some(item_id.into()),
            newest_first: true,
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// All transfers for one item inside `[since, until)`.
    #[must_use]
    pub fn window(item_id: impl Into<String>, since: i64, until: i64) -> Self {
        Self {
            item_id: Some(item_id.into()),
            since: Some(since),
            until: Some(until),
            ..Self::default()
        }
    }
}

/// Read access to the blockchain index.
#[async_trait]
pub trait SubgraphPort: Send + Sync {
    /// List every item identifier known to the index.
    async fn item_ids(&self) -> Result<Vec<String>, SubgraphError>;

    /// Fetch transfers matching `query`, fully paginated.
    async fn transfers(&self, query: TransferQuery) -> Result<Vec<Transfer>, SubgraphError>;

    /// Fetch every active listing for one item.
    async fn listings(&self, item_id: &str) -> Result<Vec<Listing>, SubgraphError>;

    /// Look up one user's position in one item.
    async fn balance(&self, user: &str, item_id: &str) -> Result<Option<Balance>, SubgraphError>;
}
