//! Game metadata adapter - item name/image/type lookups.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ItemMetadataPort, MetadataError};
use crate::domain::market::ItemDetails;

/// REST client for the third-party game item API.
#[derive(Debug, Clone)]
pub struct ItemApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItemApiClient {
    /// Create a new client against `base_url` with the given timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Upstream(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ItemMetadataPort for ItemApiClient {
    async fn item_details(&self, item_id: &str) -> Result<Option<ItemDetails>, MetadataError> {
        let url = format!("{}/items/{item_id}", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| MetadataError::Upstream(e.to_string()))?;

        // Unknown items are an empty lookup, not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Upstream(format!(
                "game API returned HTTP {status}"
            )));
        }

        let details: ItemDetails = response
            .json()
            .await
            .map_err(|e| MetadataError::Decode(e.to_string()))?;

        Ok(Some(details))
    }
}
