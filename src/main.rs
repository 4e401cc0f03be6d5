//! Petsit booking engine - pricing and availability over HTTP/JSON

use petsit_booking::{app, config::Config, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides, e.g. RUST_LOG=petsit_booking=debug,tower_http=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(
        bind = %config.bind_addr(),
        commission_rate = %config.pricing.commission_rate,
        workday_hours = %config.pricing.workday_hours,
        half_day_hours = %config.pricing.half_day_hours,
        day_start = %config.pricing.day_start,
        day_end = %config.pricing.day_end,
        min_lead_minutes = config.min_lead_minutes,
        catalog_ttl_secs = config.catalog_ttl.as_secs(),
        "Configuration loaded"
    );

    let addr = config.bind_addr();
    let router = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
