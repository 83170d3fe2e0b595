//! Exchange-rate adapter - ETH/USD spot with hardcoded fallback.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::ports::ExchangeRatePort;

/// Rate used when the price API is unreachable or malformed.
pub const FALLBACK_ETH_USD: Decimal = dec!(2500);

/// Coingecko-style price payload.
#[derive(Debug, Deserialize)]
struct PriceWire {
    ethereum: EthereumPriceWire,
}

#[derive(Debug, Deserialize)]
struct EthereumPriceWire {
    usd: Decimal,
}

/// REST client for the ETH/USD spot price.
#[derive(Debug, Clone)]
pub struct EthPriceClient {
    http: reqwest::Client,
    url: String,
}

impl EthPriceClient {
    /// Create a new client against `url` with the given timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    async fn fetch(&self) -> Result<Decimal, reqwest::Error> {
        let wire: PriceWire = self.http.get(&self.url).send().await?.json().await?;
        Ok(wire.ethereum.usd)
    }
}

#[async_trait]
impl ExchangeRatePort for EthPriceClient {
    async fn eth_usd(&self) -> Decimal {
        match self.fetch().await {
            Ok(rate) => rate,
            Err(e) => {
                tracing::warn!(error = %e, fallback = %FALLBACK_ETH_USD, "ETH price fetch failed, using fallback rate");
                FALLBACK_ETH_USD
            }
        }
    }
}
