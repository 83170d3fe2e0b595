//! Application Ports (Driven)
//!
//! Interfaces for the external systems this service reads from: the
//! blockchain subgraph, the game metadata API and the exchange-rate
//! API.

mod exchange_rate_port;
mod metadata_port;
mod subgraph_port;

pub use exchange_rate_port::ExchangeRatePort;
pub use metadata_port::{ItemMetadataPort, MetadataError};
pub use subgraph_port::{SubgraphError, SubgraphPort, TransferQuery};
