//! Source-data value types read from the blockchain index.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw on-chain purchase event for one item.
///
/// Transfers are immutable source data from the index; the service
/// never creates or mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Item identifier.
    pub item_id: String,
    /// Transaction hash of the purchase.
    pub tx_hash: String,
    /// Unix timestamp (seconds) of the block.
    pub timestamp: i64,
    /// Price per unit in ETH.
    pub unit_price_eth: Decimal,
    /// Number of units purchased.
    pub quantity: u64,
    /// Total ETH paid for this transfer.
    pub total_value_eth: Decimal,
    /// Buyer address.
    pub recipient: String,
}

/// An active on-chain sell order for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Item identifier.
    pub item_id: String,
    /// Asking price per unit in ETH.
    pub unit_price_eth: Decimal,
    /// Units still available.
    pub remaining_quantity: u64,
    /// Seller address.
    pub owner: String,
}

/// Item metadata looked up from the game API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Display name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Item category (weapon, consumable, ...).
    #[serde(rename = "type")]
    pub item_type: String,
}

/// A user's position in one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Units held.
    pub quantity: u64,
}

/// Chart/bucket timeframe accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    /// 15 minutes.
    M15,
    /// 1 hour.
    H1,
    /// 4 hours.
    H4,
    /// 1 day.
    D1,
}

impl Timeframe {
    /// Parse a timeframe label. Unknown labels fall back to one day,
    /// matching the permissive handling of the dashboard's query
    /// parameters.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "15m" => Self::M15,
            "1h" => Self::H1,
            "4h" => Self::H4,
            _ => Self::D1,
        }
    }

    /// Interval length in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::M15 => 15 * 60,
            Self::H1 => 60 * 60,
            Self::H4 => 4 * 60 * 60,
            Self::D1 => 24 * 60 * 60,
        }
    }

    /// Canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M15 => "15m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_parses_known_labels() {
        assert_eq!(Timeframe::parse("15m"), Timeframe::M15);
        assert_eq!(Timeframe::parse("1h"), Timeframe::H1);
        assert_eq!(Timeframe::parse("4h"), Timeframe::H4);
        assert_eq!(Timeframe::parse("1d"), Timeframe::D1);
    }

    #[test]
    fn timeframe_unknown_label_defaults_to_one_day() {
        assert_eq!(Timeframe::parse("3w"), Timeframe::D1);
        assert_eq!(Timeframe::parse(""), Timeframe::D1);
    }

    #[test]
    fn timeframe_seconds() {
        assert_eq!(Timeframe::M15.seconds(), 900);
        assert_eq!(Timeframe::D1.seconds(), 86_400);
    }
}
