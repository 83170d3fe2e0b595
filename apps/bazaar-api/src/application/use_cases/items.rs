//! Item listing and metadata lookup use cases.

use std::sync::Arc;

use crate::application::ports::{
    ItemMetadataPort, MetadataError, SubgraphError, SubgraphPort,
};
use crate::domain::market::ItemDetails;

/// Use case for listing every tradeable item identifier.
pub struct ListItemsUseCase<S>
where
    S: SubgraphPort,
{
    subgraph: Arc<S>,
}

impl<S> ListItemsUseCase<S>
where
    S: SubgraphPort,
{
    /// Create a new `ListItemsUseCase`.
    pub const fn new(subgraph: Arc<S>) -> Self {
        Self { subgraph }
    }

    /// List item identifiers known to the index.
    pub async fn execute(&self) -> Result<Vec<String>, SubgraphError> {
        self.subgraph.item_ids().await
    }
}

/// Use case for proxying one item's metadata from the game API.
pub struct GetItemDetailsUseCase<M>
where
    M: ItemMetadataPort,
{
    metadata: Arc<M>,
}

impl<M> GetItemDetailsUseCase<M>
where
    M: ItemMetadataPort,
{
    /// Create a new `GetItemDetailsUseCase`.
    pub const fn new(metadata: Arc<M>) -> Self {
        Self { metadata }
    }

    /// Look up metadata for one item; `None` when unknown upstream.
    pub async fn execute(&self, item_id: &str) -> Result<Option<ItemDetails>, MetadataError> {
        self.metadata.item_details(item_id).await
    }
}
