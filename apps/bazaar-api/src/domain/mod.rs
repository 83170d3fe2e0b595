//! Domain layer - Core aggregation logic with no external dependencies.

pub mod market;
