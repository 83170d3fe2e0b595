//! Infrastructure layer - Adapters and external integrations.

pub mod config;
pub mod exchange;
pub mod http;
pub mod metadata;
pub mod subgraph;
