//! Configuration settings for the market API.
//!
//! Everything is loadable from environment variables with sensible
//! defaults; no config file is read.

use std::time::Duration;

use thiserror::Error;

/// Default HTTP API port.
const DEFAULT_HTTP_PORT: u16 = 4000;

/// Default Prometheus metrics port (0 = disabled).
const DEFAULT_METRICS_PORT: u16 = 9090;

/// Default subgraph endpoint (local graph-node).
const DEFAULT_SUBGRAPH_URL: &str = "http://localhost:8000/subgraphs/name/game-items";

/// Default game metadata API base URL.
const DEFAULT_ITEM_API_URL: &str = "https://api.gameitems.example/v1";

/// Default ETH/USD spot price endpoint.
const DEFAULT_ETH_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// Default upstream request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value we could not parse.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP API port.
    pub http_port: u16,
    /// Prometheus metrics port (0 = disabled).
    pub metrics_port: u16,
    /// GraphQL subgraph endpoint.
    pub subgraph_url: String,
    /// Game metadata API base URL.
    pub item_api_url: String,
    /// ETH/USD spot price endpoint.
    pub eth_price_url: String,
    /// Timeout applied to every upstream request.
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            subgraph_url: DEFAULT_SUBGRAPH_URL.to_string(),
            item_api_url: DEFAULT_ITEM_API_URL.to_string(),
            eth_price_url: DEFAULT_ETH_PRICE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Recognized variables: `HTTP_PORT`, `METRICS_PORT`,
    /// `SUBGRAPH_URL`, `ITEM_API_URL`, `ETH_PRICE_URL`,
    /// `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            http_port: env_u16("HTTP_PORT", defaults.http_port)?,
            metrics_port: env_u16("METRICS_PORT", defaults.metrics_port)?,
            subgraph_url: env_string("SUBGRAPH_URL", &defaults.subgraph_url),
            item_api_url: env_string("ITEM_API_URL", &defaults.item_api_url),
            eth_price_url: env_string("ETH_PRICE_URL", &defaults.eth_price_url),
            http_timeout: Duration::from_secs(env_u64(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
        })
    }
}

/// Read a string variable, falling back to the default when unset.
fn env_string(key: &'static str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a u16 variable, falling back to the default when unset.
fn env_u16(key: &'static str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: key,
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Read a u64 variable, falling back to the default when unset.
fn env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            name: key,
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let settings = Settings::default();
        assert_eq!(settings.http_port, DEFAULT_HTTP_PORT);
        assert!(settings.subgraph_url.starts_with("http://localhost"));
        assert_eq!(settings.http_timeout, Duration::from_secs(30));
    }
}
