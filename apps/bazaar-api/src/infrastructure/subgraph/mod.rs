//! Subgraph adapter - paginated GraphQL reads from the blockchain
//! index.

mod client;
mod queries;
mod wire;

pub use client::{PAGE_SIZE, SubgraphClient};
