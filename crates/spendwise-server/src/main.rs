//! Spendwise Server
//!
//! Fits the expense categorizer once at startup, then serves the expense API.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use spendwise_server::{create_router, AppState, Cli, ServerConfig};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting Spendwise server");

    // Load configuration
    let config = ServerConfig::load(&cli)?;
    info!("Configuration loaded successfully");
    info!(
        "Storage: {:?} ({})",
        config.storage.backend,
        config.storage.path.display()
    );

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Fit the categorizer and open the store before accepting traffic
    let addr: SocketAddr = config.bind_address().parse()?;
    let state = AppState::from_config(config)?.with_metrics(metrics_handle);
    info!("Application state initialized successfully");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spendwise_server=debug,spendwise_classifiers=debug,spendwise_store=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("spendwise_server=info,spendwise_classifiers=info,spendwise_store=info")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spendwise_requests_total",
        "Total number of requests processed by endpoint"
    );
    metrics::describe_counter!(
        "spendwise_predictions_total",
        "Total number of category predictions by category"
    );
    metrics::describe_counter!(
        "spendwise_expenses_created_total",
        "Total number of expenses stored"
    );
    metrics::describe_histogram!(
        "spendwise_predict_latency_us",
        metrics::Unit::Microseconds,
        "Categorizer prediction latency in microseconds"
    );
    metrics::describe_counter!("spendwise_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
