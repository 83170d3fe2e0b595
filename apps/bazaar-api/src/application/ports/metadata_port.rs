//! Item Metadata Port (Driven Port)
//!
//! Interface to the third-party game API that knows item names,
//! images and categories.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::market::ItemDetails;

/// Errors surfaced by the metadata adapter.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Network or HTTP failure reaching the game API.
    #[error("metadata API unreachable: {0}")]
    Upstream(String),

    /// The game API answered with a payload we could not decode.
    #[error("metadata response malformed: {0}")]
    Decode(String),
}

/// Item metadata lookup.
#[async_trait]
pub trait ItemMetadataPort: Send + Sync {
    /// Look up metadata for one item. `Ok(None)` when the game API
    /// does not know the item.
    async fn item_details(&self, item_id: &str) -> Result<Option<ItemDetails>, MetadataError>;
}
