//! Wire types for subgraph responses.
//!
//! The subgraph serializes every numeric as a string; these types
//! mirror that and convert into domain values, surfacing parse
//! failures as decode errors instead of panicking.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::ports::SubgraphError;
use crate::domain::market::{Balance, Listing, Transfer};

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    /// Query payload, keyed by collection name.
    pub data: Option<serde_json::Value>,
    /// Populated on query failure, even with HTTP 200.
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of the GraphQL `errors` field.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    /// Upstream error message.
    pub message: String,
}

/// Nested entity reference.
#[derive(Debug, Deserialize)]
pub struct ItemRefWire {
    /// Item identifier.
    pub id: String,
}

/// Raw transfer row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferWire {
    /// Item reference.
    pub item: ItemRefWire,
    /// Transaction hash.
    pub tx_hash: String,
    /// Block timestamp as a decimal string.
    pub timestamp: String,
    /// Unit price in ETH as a decimal string.
    pub unit_price_eth: String,
    /// Units purchased as a decimal string.
    pub quantity: String,
    /// Total ETH paid as a decimal string.
    pub total_value_eth: String,
    /// Buyer address.
    pub recipient: String,
}

impl TryFrom<TransferWire> for Transfer {
    type Error = SubgraphError;

    fn try_from(wire: TransferWire) -> Result<Self, Self::Error> {
        Ok(Self {
            item_id: wire.item.id,
            tx_hash: wire.tx_hash,
            timestamp: parse_i64("timestamp", &wire.timestamp)?,
            unit_price_eth: parse_decimal("unitPriceEth", &wire.unit_price_eth)?,
            quantity: parse_u64("quantity", &wire.quantity)?,
            total_value_eth: parse_decimal("totalValueEth", &wire.total_value_eth)?,
            recipient: wire.recipient,
        })
    }
}

/// Raw listing row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingWire {
    /// Item reference.
    pub item: ItemRefWire,
    /// Asking price in ETH as a decimal string.
    pub unit_price_eth: String,
    /// Units still available as a decimal string.
    pub remaining_quantity: String,
    /// Seller address.
    pub owner: String,
}

impl TryFrom<ListingWire> for Listing {
    type Error = SubgraphError;

    fn try_from(wire: ListingWire) -> Result<Self, Self::Error> {
        Ok(Self {
            item_id: wire.item.id,
            unit_price_eth: parse_decimal("unitPriceEth", &wire.unit_price_eth)?,
            remaining_quantity: parse_u64("remainingQuantity", &wire.remaining_quantity)?,
            owner: wire.owner,
        })
    }
}

/// Raw item index row.
#[derive(Debug, Deserialize)]
pub struct ItemWire {
    /// Item identifier.
    pub id: String,
}

/// Raw balance row.
#[derive(Debug, Deserialize)]
pub struct BalanceWire {
    /// Units held as a decimal string.
    pub quantity: String,
}

impl TryFrom<BalanceWire> for Balance {
    type Error = SubgraphError;

    fn try_from(wire: BalanceWire) -> Result<Self, Self::Error> {
        Ok(Self {
            quantity: parse_u64("quantity", &wire.quantity)?,
        })
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, SubgraphError> {
    value
        .parse()
        .map_err(|_| SubgraphError::Decode(format!("{field}: not a decimal: {value:?}")))
}

fn parse_i64(field: &str, value: &str) -> Result<i64, SubgraphError> {
    value
        .parse()
        .map_err(|_| SubgraphError::Decode(format!("{field}: not an integer: {value:?}")))
}

fn parse_u64(field: &str, value: &str) -> Result<u64, SubgraphError> {
    value
        .parse()
        .map_err(|_| SubgraphError::Decode(format!("{field}: not an unsigned integer: {value:?}")))
}
