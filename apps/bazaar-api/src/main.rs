//! Bazaar API Binary
//!
//! Starts the market data facade.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin bazaar-api
//! ```
//!
//! # Environment Variables
//!
//! - `HTTP_PORT`: HTTP server port (default: 4000)
//! - `METRICS_PORT`: Prometheus metrics port, 0 disables (default: 9090)
//! - `SUBGRAPH_URL`: GraphQL subgraph endpoint (default: local graph-node)
//! - `ITEM_API_URL`: game metadata API base URL
//! - `ETH_PRICE_URL`: ETH/USD spot price endpoint
//! - `HTTP_TIMEOUT_SECS`: upstream request timeout (default: 30)
//! - `RUST_LOG`: log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use bazaar_api::application::use_cases::{
    GetBalanceUseCase, GetChartDataUseCase, GetItemDetailsUseCase, GetItemStatsUseCase,
    GetMarketStatsUseCase, GetOrderBookUseCase, GetTimeframeDataUseCase, GetTradesUseCase,
    ListItemsUseCase,
};
use bazaar_api::infrastructure::config::Settings;
use bazaar_api::infrastructure::exchange::EthPriceClient;
use bazaar_api::infrastructure::http::{AppState, create_router};
use bazaar_api::infrastructure::metadata::ItemApiClient;
use bazaar_api::infrastructure::subgraph::SubgraphClient;
use bazaar_api::observability;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting Bazaar market API");

    let settings = Settings::from_env()?;
    log_settings(&settings);

    init_metrics(&settings);

    let state = create_state(&settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", settings.http_port).parse()?;
    tracing::info!(%addr, "HTTP server starting");
    log_endpoints();

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Bazaar market API stopped");
    Ok(())
}

/// Load .env file when present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses static directive strings that are compile-time constants guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "bazaar_api=info"
                    .parse()
                    .expect("static directive 'bazaar_api=info' is valid"),
            ),
        )
        .init();
}

/// Log the loaded settings.
fn log_settings(settings: &Settings) {
    tracing::info!(
        http_port = settings.http_port,
        metrics_port = settings.metrics_port,
        subgraph_url = %settings.subgraph_url,
        "Configuration loaded"
    );
}

/// Start the Prometheus exporter when enabled; the API runs without it
/// on failure.
fn init_metrics(settings: &Settings) {
    if settings.metrics_port == 0 {
        tracing::info!("Metrics exporter disabled");
        return;
    }

    match format!("0.0.0.0:{}", settings.metrics_port).parse() {
        Ok(addr) => {
            if let Err(e) = observability::init_metrics(addr) {
                tracing::warn!(error = %e, "Failed to start metrics exporter, continuing without it");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Invalid metrics address"),
    }
}

/// Wire adapters and use cases into the shared application state.
fn create_state(
    settings: &Settings,
) -> anyhow::Result<AppState<SubgraphClient, ItemApiClient, EthPriceClient>> {
    let subgraph = Arc::new(SubgraphClient::new(
        settings.subgraph_url.clone(),
        settings.http_timeout,
    )?);
    let metadata = Arc::new(ItemApiClient::new(
        settings.item_api_url.clone(),
        settings.http_timeout,
    )?);
    let exchange_rate = Arc::new(EthPriceClient::new(
        settings.eth_price_url.clone(),
        settings.http_timeout,
    )?);

    Ok(AppState {
        items: Arc::new(ListItemsUseCase::new(Arc::clone(&subgraph))),
        item_details: Arc::new(GetItemDetailsUseCase::new(metadata)),
        item_stats: Arc::new(GetItemStatsUseCase::new(Arc::clone(&subgraph))),
        market_stats: Arc::new(GetMarketStatsUseCase::new(Arc::clone(&subgraph))),
        chart_data: Arc::new(GetChartDataUseCase::new(Arc::clone(&subgraph))),
        timeframe_data: Arc::new(GetTimeframeDataUseCase::new(Arc::clone(&subgraph))),
        order_book: Arc::new(GetOrderBookUseCase::new(Arc::clone(&subgraph))),
        trades: Arc::new(GetTradesUseCase::new(Arc::clone(&subgraph))),
        balance: Arc::new(GetBalanceUseCase::new(subgraph)),
        exchange_rate,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Log the exposed endpoints at startup.
fn log_endpoints() {
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health");
    tracing::info!("  GET /api/items");
    tracing::info!("  GET /api/item-details?itemId=");
    tracing::info!("  GET /api/stats");
    tracing::info!("  GET /api/stats/{{itemId}}");
    tracing::info!("  GET /api/chart-data/{{itemId}}");
    tracing::info!("  GET /api/orderbook/{{itemId}}");
    tracing::info!("  GET /api/trades/{{itemId}}");
    tracing::info!("  GET /api/timeframe-data/{{itemId}}");
    tracing::info!("  GET /api/balance/{{userAddress}}/{{itemId}}");
    tracing::info!("  GET /api/eth-price");
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed: a process that
/// cannot respond to termination signals should fail at startup.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
