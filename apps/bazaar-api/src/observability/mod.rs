//! Observability - structured logging and Prometheus metrics.

mod metrics;

pub use metrics::{
    MetricsError, init_metrics, record_api_request, record_subgraph_fetch,
};
