//! User balance use case.

use std::sync::Arc;

use crate::application::ports::{SubgraphError, SubgraphPort};
use crate::domain::market::Balance;

/// Use case for one user's position in one item.
pub struct GetBalanceUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> GetBalanceUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `GetBalanceUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// Look up the position; `None` when the user holds nothing.
    pub async fn execute(
        &self,
        user: &str,
        item_id: &str,
    ) -> Result<Option<Balance>, SubgraphError> {
        self.subgraph.balance(user, item_id).await
    }
}
