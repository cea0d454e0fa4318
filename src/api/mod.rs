//! API module for the bus tracker
//!
//! Contains all REST API endpoints and routing.

pub mod calendar;
pub mod children;
pub mod history;
pub mod state;

pub use state::AppState;

use crate::config::Config;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Build the full application router
pub fn create_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/children", children::create_router())
        .nest("/api/history", history::create_router())
        .nest("/api/calendar", calendar::create_router());

    let cors = cors_layer(&config.cors_origins);
    let router = if config.enable_request_logging {
        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
    } else {
        router.layer(cors)
    };

    router.with_state(state)
}

/// Any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "today": state.today(),
        "timezone": state.timezone.name(),
        "timestamp": state.clock.now_utc().timestamp(),
    }))
}
