//! Bus tracker HTTP server

use anyhow::Context;
use bus_tracker::api::{create_router, AppState};
use bus_tracker::config::Config;
use bus_tracker::logging::{init_logging, log_shutdown, log_startup};
use bus_tracker::services::{MockApiClient, SystemTimeProvider};
use bus_tracker::store::MockDataStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    init_logging(&config.log_level, config.is_production()).context("failed to initialize logging")?;
    log_startup();
    config.log_config();

    let store = match &config.data_file {
        Some(path) => MockDataStore::from_file(path)
            .with_context(|| format!("failed to load dataset from {}", path.display()))?,
        None => MockDataStore::sample().context("embedded dataset is invalid")?,
    };
    info!(
        children = store.children().len(),
        schedules = store.schedules().len(),
        exceptions = store.exceptions().len(),
        "Dataset loaded"
    );

    let client = MockApiClient::new(Arc::new(store))
        .with_latency(config.latency())
        .with_timeout(config.request_timeout_duration());
    let state = AppState::new(Arc::new(client), Arc::new(SystemTimeProvider::new()), config.timezone)
        .with_week_start(config.week_start);
    let app = create_router(state, &config);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!("Bus tracker listening on http://{}", config.bind_address());
    info!("API available at http://{}/api/", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "Cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    log_shutdown("ctrl-c");
}
