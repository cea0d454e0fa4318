//! Children API endpoints
//!
//! Profiles, live route events and the bus position for each child.

use crate::api::state::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{Child, GeoPoint, RouteEvent};
use crate::services::api_client::SchoolBusApi;
use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::debug;

/// Bus position relative to home
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub child_id: String,
    pub bus: GeoPoint,
    pub home: GeoPoint,
    pub last_update: String,
    /// Straight-line distance, rounded to 0.1 km
    pub distance_km: f64,
}

/// Create children API routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_children))
        .route("/:id", get(get_child))
        .route("/:id/events", get(get_route_events))
        .route("/:id/locations", get(get_route_locations))
}

pub async fn list_children(State(state): State<AppState>) -> AppResult<Json<Vec<Child>>> {
    let children = state.client.get_children().await?;
    Ok(Json(children))
}

pub async fn get_child(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Child>> {
    debug!(child_id = %id, "Fetching child");
    let child = state.client.require_child(&id).await?;
    Ok(Json(child))
}

/// Events of a known child; an unknown child is a 404, not an empty list
pub async fn get_route_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<RouteEvent>>> {
    state.client.require_child(&id).await?;
    let events = state.client.get_route_events(&id).await?;
    Ok(Json(events))
}

pub async fn get_route_locations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LocationsResponse>> {
    let locations = state
        .client
        .get_route_locations(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("route locations for {id}")))?;

    let distance_km = (locations.distance_to_home_km() * 10.0).round() / 10.0;
    Ok(Json(LocationsResponse {
        child_id: id,
        bus: locations.bus,
        home: locations.home,
        last_update: locations.last_update,
        distance_km,
    }))
}
