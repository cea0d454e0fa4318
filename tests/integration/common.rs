//! Shared fixtures for the integration tests

use axum_test::TestServer;
use bus_tracker::api::{create_router, AppState};
use bus_tracker::config::Config;
use bus_tracker::services::{MockApiClient, MockTimeProvider, SimulatedLatency};
use bus_tracker::store::MockDataStore;
use std::sync::Arc;

/// Sample dataset client that answers immediately
pub fn instant_client() -> Arc<MockApiClient> {
    let store = Arc::new(MockDataStore::sample().unwrap());
    Arc::new(MockApiClient::new(store).with_latency(SimulatedLatency::none()))
}

/// Clock pinned to the afternoon of 2026-01-12 (Bogotá)
pub fn school_day_clock() -> Arc<MockTimeProvider> {
    Arc::new(MockTimeProvider::new_from_ymd_hms(2026, 1, 12, 20, 0, 0).unwrap())
}

pub fn create_test_server(config: &Config) -> TestServer {
    let state = AppState::new(instant_client(), school_day_clock(), config.timezone)
        .with_week_start(config.week_start);
    TestServer::new(create_router(state, config)).unwrap()
}
