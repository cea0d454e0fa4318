//! Calendar API endpoints
//!
//! Month grid, day detail and novelty submission for the calendar page.

use crate::api::state::AppState;
use crate::calendar_span;
use crate::error::{AppError, AppResult};
use crate::logging::{log_novelty_rejected, log_novelty_submitted};
use crate::models::{ChildFilter, ChildOption, Novelty, NoveltyDraft, NoveltyError, Schedule, ServiceException};
use crate::services::api_client::SchoolBusApi;
use crate::services::calendar_service::{CalendarCell, CalendarMonth, CalendarView, DayDetail};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

/// `?child=`; `all` or absent shows every child
#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub child: Option<String>,
}

impl CalendarParams {
    fn filter(&self) -> ChildFilter {
        ChildFilter::from_query(self.child.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub child: String,
    pub headers: Vec<&'static str>,
    pub cells: Vec<CalendarCell>,
}

/// Body of a novelty submission
#[derive(Debug, Deserialize)]
pub struct NoveltyRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub child_ids: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// Create calendar API routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/schedules", get(list_schedules))
        .route("/exceptions", get(list_exceptions))
        .route("/exceptions/upcoming", get(upcoming_exceptions))
        .route("/children", get(child_selector))
        .route("/month", get(current_month))
        .route("/month/:year/:month", get(month_grid))
        .route("/day/:date", get(day_detail))
        .route("/novelties", get(list_novelties).post(submit_novelty))
}

/// Schedules and exceptions, fetched together
async fn calendar_data(state: &AppState) -> AppResult<(Vec<Schedule>, Vec<ServiceException>)> {
    let data = tokio::try_join!(state.client.get_schedules(), state.client.get_exceptions())?;
    Ok(data)
}

pub async fn list_schedules(State(state): State<AppState>) -> AppResult<Json<Vec<Schedule>>> {
    Ok(Json(state.client.get_schedules().await?))
}

pub async fn list_exceptions(State(state): State<AppState>) -> AppResult<Json<Vec<ServiceException>>> {
    Ok(Json(state.client.get_exceptions().await?))
}

/// Exceptions from today on, earliest first
pub async fn upcoming_exceptions(State(state): State<AppState>) -> AppResult<Json<Vec<ServiceException>>> {
    let exceptions = state.client.get_exceptions().await?;
    let everyone = ChildFilter::All;
    let view = CalendarView::new(&[], &exceptions, &[], &everyone, state.today());
    Ok(Json(view.upcoming_exceptions().into_iter().cloned().collect()))
}

pub async fn child_selector(State(state): State<AppState>) -> AppResult<Json<Vec<ChildOption>>> {
    let children = state.client.get_children().await?;
    Ok(Json(ChildOption::selector(&children)))
}

pub async fn current_month(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> AppResult<Json<MonthResponse>> {
    let month = CalendarMonth::containing(state.today());
    render_month(&state, month, params.filter()).await.map(Json)
}

pub async fn month_grid(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
    Query(params): Query<CalendarParams>,
) -> AppResult<Json<MonthResponse>> {
    let Path((year, month)) = path?;
    let month = CalendarMonth::new(year, month)
        .ok_or_else(|| AppError::Validation(format!("invalid month: {year}-{month}")))?;
    render_month(&state, month, params.filter()).await.map(Json)
}

async fn render_month(state: &AppState, month: CalendarMonth, child: ChildFilter) -> AppResult<MonthResponse> {
    let span = calendar_span!(month.year(), month.month(), child);

    async {
        let (schedules, exceptions) = calendar_data(state).await?;
        let novelties = state.novelties.read().await;
        let view = CalendarView::new(&schedules, &exceptions, novelties.all(), &child, state.today())
            .with_week_start(state.week_start);

        Ok(MonthResponse {
            year: month.year(),
            month: month.month(),
            title: month.title(),
            child: child.to_string(),
            headers: state.week_start.headers(),
            cells: view.month_grid(month),
        })
    }
    .instrument(span)
    .await
}

pub async fn day_detail(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(params): Query<CalendarParams>,
) -> AppResult<Json<DayDetail>> {
    let date = parse_date(&date)?;
    let child = params.filter();

    let (schedules, exceptions) = calendar_data(&state).await?;
    let novelties = state.novelties.read().await;
    let view = CalendarView::new(&schedules, &exceptions, novelties.all(), &child, state.today());

    Ok(Json(view.day_detail(date)))
}

pub async fn list_novelties(State(state): State<AppState>) -> Json<Vec<Novelty>> {
    Json(state.novelties.read().await.all().to_vec())
}

/// Record a pending novelty; 400 on a malformed body, an empty selection,
/// a blank note or an unknown child
pub async fn submit_novelty(
    State(state): State<AppState>,
    payload: Result<Json<NoveltyRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Novelty>)> {
    let Json(request) = payload?;
    let date = request.date;
    let draft = NoveltyDraft::from_parts(request.child_ids, request.note);

    if let Err(error) = validate_novelty(&state, &draft).await {
        log_novelty_rejected(&date.to_string(), &error.to_string());
        return Err(error);
    }

    let now = state.clock.now_utc();
    let mut book = state.novelties.write().await;
    let novelty = book.submit(draft, date, now)?;
    drop(book);

    log_novelty_submitted(&novelty.id.to_string(), &date.to_string(), novelty.child_ids.len());
    Ok((StatusCode::CREATED, Json(novelty)))
}

async fn validate_novelty(state: &AppState, draft: &NoveltyDraft) -> AppResult<()> {
    draft.validate()?;

    let children = state.client.get_children().await?;
    if let Some(unknown) = draft
        .selected_children()
        .iter()
        .find(|id| !children.iter().any(|child| &child.id == *id))
    {
        return Err(NoveltyError::UnknownChild(unknown.clone()).into());
    }
    Ok(())
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| AppError::Validation(format!("invalid date: {value}")))
}
