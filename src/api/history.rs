//! History API endpoints
//!
//! Trip history with the child and status filters of the history page.

use crate::api::state::AppState;
use crate::error::AppResult;
use crate::models::RouteHistory;
use crate::services::api_client::SchoolBusApi;
use crate::services::history_filter::{HistoryParams, HistoryQuery};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;

/// Status chip with its icon resolved to a glyph name
#[derive(Debug, Serialize)]
pub struct StatusFilterResponse {
    pub id: String,
    pub label: String,
    pub icon: &'static str,
}

/// Create history API routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(query_history))
        .route("/filters", get(status_filters))
}

/// `?child_id=&status=`; `all` or absent disables a filter
pub async fn query_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Vec<RouteHistory>>> {
    let query = HistoryQuery::try_from(params)?;
    let history = state.client.query_route_history(&query).await?;
    Ok(Json(history))
}

pub async fn status_filters(State(state): State<AppState>) -> AppResult<Json<Vec<StatusFilterResponse>>> {
    let filters = state
        .client
        .get_status_filters()
        .await?
        .into_iter()
        .map(|option| StatusFilterResponse {
            icon: option.icon.glyph(),
            id: option.id,
            label: option.label,
        })
        .collect();
    Ok(Json(filters))
}
