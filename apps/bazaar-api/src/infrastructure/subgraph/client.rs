//! GraphQL client with sequential pagination.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::application::ports::{SubgraphError, SubgraphPort, TransferQuery};
use crate::domain::market::{Balance, Listing, Transfer};
use crate::observability;

use super::queries;
use super::wire::{BalanceWire, GraphQlResponse, ItemWire, ListingWire, TransferWire};

/// Rows requested per page.
pub const PAGE_SIZE: usize = 1000;

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Subgraph adapter over HTTP.
///
/// Pagination is sequential: pages are awaited one at a time so the
/// accumulated order matches the index order. Any page failing aborts
/// the whole fetch and discards partial results; there is no retry.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    http: reqwest::Client,
    url: String,
}

impl SubgraphClient {
    /// Create a new client against `url` with the given timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SubgraphError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubgraphError::Upstream(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Execute one GraphQL request and return the `data` payload.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, SubgraphError> {
        let request = GraphQlRequest { query, variables };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SubgraphError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubgraphError::Upstream(format!(
                "subgraph returned HTTP {status}"
            )));
        }

        let envelope: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SubgraphError::Decode(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(SubgraphError::Query(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| SubgraphError::Decode("response carried no data".to_string()))
    }

    /// Fetch every row of `root`, paging until a short page.
    ///
    /// `max` caps the total rows fetched; `None` pages through the
    /// full matching set. Pages are concatenated in index order.
    async fn fetch_all<W: DeserializeOwned>(
        &self,
        query: &str,
        root: &str,
        base_variables: Map<String, Value>,
        max: Option<usize>,
    ) -> Result<Vec<W>, SubgraphError> {
        let mut rows: Vec<W> = Vec::new();
        let mut skip = 0usize;
        let mut pages = 0u64;

        loop {
            let first = match max {
                Some(max) => {
                    let remaining = max.saturating_sub(rows.len());
                    if remaining == 0 {
                        break;
                    }
                    remaining.min(PAGE_SIZE)
                }
                None => PAGE_SIZE,
            };

            let mut variables = base_variables.clone();
            variables.insert("first".to_string(), json!(first));
            variables.insert("skip".to_string(), json!(skip));

            let data = self.execute(query, Value::Object(variables)).await?;
            let page_value = data.get(root).cloned().unwrap_or_else(|| json!([]));
            let page: Vec<W> = serde_json::from_value(page_value)
                .map_err(|e| SubgraphError::Decode(format!("{root}: {e}")))?;

            let page_len = page.len();
            rows.extend(page);
            skip += page_len;
            pages += 1;

            // A short page means the index is exhausted.
            if page_len < first {
                break;
            }
        }

        observability::record_subgraph_fetch(root, pages, rows.len());
        Ok(rows)
    }
}

#[async_trait]
impl SubgraphPort for SubgraphClient {
    async fn item_ids(&self) -> Result<Vec<String>, SubgraphError> {
        let items: Vec<ItemWire> = self
            .fetch_all(queries::ITEMS_QUERY, queries::ITEMS_ROOT, Map::new(), None)
            .await?;

        Ok(items.into_iter().map(|item| item.id).collect())
    }

    async fn transfers(&self, query: TransferQuery) -> Result<Vec<Transfer>, SubgraphError> {
        let document = queries::transfers_query(&query);

        let mut variables = Map::new();
        if let Some(item_id) = &query.item_id {
            variables.insert("item".to_string(), json!(item_id));
        }
        if let Some(since) = query.since {
            variables.insert("since".to_string(), json!(since));
        }
        if let Some(until) = query.until {
            variables.insert("until".to_string(), json!(until));
        }

        let rows: Vec<TransferWire> = self
            .fetch_all(&document, queries::TRANSFERS_ROOT, variables, query.limit)
            .await?;

        rows.into_iter().map(Transfer::try_from).collect()
    }

    async fn listings(&self, item_id: &str) -> Result<Vec<Listing>, SubgraphError> {
        let mut variables = Map::new();
        variables.insert("item".to_string(), json!(item_id));

        let rows: Vec<ListingWire> = self
            .fetch_all(
                queries::LISTINGS_QUERY,
                queries::LISTINGS_ROOT,
                variables,
                None,
            )
            .await?;

        rows.into_iter().map(Listing::try_from).collect()
    }

    async fn balance(&self, user: &str, item_id: &str) -> Result<Option<Balance>, SubgraphError> {
        let variables = json!({ "user": user, "item": item_id });

        let data = self.execute(queries::BALANCE_QUERY, variables).await?;
        let rows_value = data
            .get(queries::BALANCES_ROOT)
            .cloned()
            .unwrap_or_else(|| json!([]));
        let rows: Vec<BalanceWire> = serde_json::from_value(rows_value)
            .map_err(|e| SubgraphError::Decode(format!("{}: {e}", queries::BALANCES_ROOT)))?;

        rows.into_iter().next().map(Balance::try_from).transpose()
    }
}
