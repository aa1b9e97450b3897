// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;
use voltage_monitor::application::snapshot_builder::SnapshotBuilder;
use voltage_monitor::infrastructure::clock::{SystemClock, UuidAlertIds};
use voltage_monitor::infrastructure::config::{load_dashboard_config, load_server_config};
use voltage_monitor::presentation::app_state::AppState;
use voltage_monitor::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let dashboard_config = load_dashboard_config()?;
    let server_config = load_server_config()?;
    tracing::info!(
        "Dashboard config: nominal {} V, capacity {} kVA, window {} samples, stale after {} ms",
        dashboard_config.nominal_voltage,
        dashboard_config.max_apparent_power_kw,
        dashboard_config.sparkline_points,
        dashboard_config.stale_data_tolerance_ms
    );

    // Create the pipeline (application layer) with system time and ids
    let snapshot_builder = SnapshotBuilder::new(
        dashboard_config,
        Arc::new(SystemClock),
        Arc::new(UuidAlertIds),
    );

    let state = Arc::new(AppState { snapshot_builder });
    let app = router(state);

    // Start server
    let addr: SocketAddr = server_config.bind_addr.parse()?;
    tracing::info!("Starting voltage-monitor service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
