//! Calendar Page State
//!
//! Owns everything the calendar screen keeps between interactions: the
//! displayed month, the selected child, the loaded schedules and exceptions,
//! the novelty form and the novelties submitted so far. Loading follows the
//! last-request-wins rule of [`RequestTracker`].

use crate::models::{
    Child, ChildFilter, ChildOption, Novelty, NoveltyBook, NoveltyDraft, NoveltyError, Schedule,
    ServiceException,
};
use crate::services::api_client::{ClientError, ClientResult, SchoolBusApi};
use crate::services::calendar_service::{CalendarCell, CalendarMonth, CalendarView, DayDetail, WeekStart};
use crate::services::request_tracker::{RequestTicket, RequestTracker};
use crate::services::time_provider::TimeProvider;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Data fetched for the calendar in one go
#[derive(Debug, Clone)]
pub struct CalendarSnapshot {
    pub children: Vec<Child>,
    pub schedules: Vec<Schedule>,
    pub exceptions: Vec<ServiceException>,
}

/// A finished load, waiting to be applied
#[derive(Debug)]
pub struct CalendarLoad {
    ticket: RequestTicket,
    result: ClientResult<CalendarSnapshot>,
}

pub struct CalendarPage<C> {
    client: Arc<C>,
    clock: Arc<dyn TimeProvider>,
    timezone: Tz,
    week_start: WeekStart,
    tracker: RequestTracker,
    month: CalendarMonth,
    selected_child: ChildFilter,
    child_options: Vec<ChildOption>,
    schedules: Vec<Schedule>,
    exceptions: Vec<ServiceException>,
    novelties: NoveltyBook,
    selected_date: Option<NaiveDate>,
    novelty_form: Option<NoveltyDraft>,
    loading: bool,
    load_error: Option<ClientError>,
}

impl<C> CalendarPage<C>
where
    C: SchoolBusApi + 'static,
{
    /// A page showing the current month, with nothing loaded yet
    pub fn new(client: Arc<C>, clock: Arc<dyn TimeProvider>, timezone: Tz) -> Self {
        let today = clock.today_in(timezone);

        Self {
            client,
            clock,
            timezone,
            week_start: WeekStart::default(),
            tracker: RequestTracker::new(),
            month: CalendarMonth::containing(today),
            selected_child: ChildFilter::All,
            child_options: Vec::new(),
            schedules: Vec::new(),
            exceptions: Vec::new(),
            novelties: NoveltyBook::new(),
            selected_date: None,
            novelty_form: None,
            loading: true,
            load_error: None,
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Start fetching children, schedules and exceptions concurrently.
    /// The returned future does not borrow the page.
    pub fn begin_load(&mut self) -> impl Future<Output = CalendarLoad> + Send + 'static {
        self.loading = true;
        let ticket = self.tracker.begin();
        let client = Arc::clone(&self.client);

        async move {
            let result = tokio::try_join!(
                client.get_children(),
                client.get_schedules(),
                client.get_exceptions()
            )
            .map(|(children, schedules, exceptions)| CalendarSnapshot {
                children,
                schedules,
                exceptions,
            });

            CalendarLoad { ticket, result }
        }
    }

    /// Apply a finished load. Returns `false` when a newer load superseded it.
    pub fn apply_load(&mut self, load: CalendarLoad) -> bool {
        if !load.ticket.is_current() {
            debug!(ticket = load.ticket.id(), "Discarding stale calendar load");
            return false;
        }

        self.loading = false;
        match load.result {
            Ok(snapshot) => {
                info!(
                    schedules = snapshot.schedules.len(),
                    exceptions = snapshot.exceptions.len(),
                    "Calendar data loaded"
                );
                self.child_options = ChildOption::selector(&snapshot.children);
                self.schedules = snapshot.schedules;
                self.exceptions = snapshot.exceptions;
                self.load_error = None;
            }
            Err(error) => {
                warn!(%error, "Failed to load calendar data");
                self.load_error = Some(error);
            }
        }
        true
    }

    /// Load and apply in one step
    pub async fn load(&mut self) -> bool {
        let load = self.begin_load().await;
        self.apply_load(load)
    }

    /// Drop any load still in flight, e.g. when the page goes away
    pub fn detach(&self) {
        self.tracker.invalidate();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&ClientError> {
        self.load_error.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today_in(self.timezone)
    }

    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn previous_month(&mut self) {
        self.month = self.month.previous();
    }

    pub fn child_options(&self) -> &[ChildOption] {
        &self.child_options
    }

    pub fn selected_child(&self) -> &ChildFilter {
        &self.selected_child
    }

    pub fn select_child(&mut self, child: ChildFilter) {
        self.selected_child = child;
    }

    pub fn exceptions(&self) -> &[ServiceException] {
        &self.exceptions
    }

    pub fn novelties(&self) -> &[Novelty] {
        self.novelties.all()
    }

    /// Associations over the current page state
    pub fn view(&self) -> CalendarView<'_> {
        CalendarView::new(
            &self.schedules,
            &self.exceptions,
            self.novelties.all(),
            &self.selected_child,
            self.today(),
        )
        .with_week_start(self.week_start)
    }

    pub fn month_grid(&self) -> Vec<CalendarCell> {
        self.view().month_grid(self.month)
    }

    /// Open a day and return what it shows
    pub fn select_date(&mut self, date: NaiveDate) -> DayDetail {
        self.selected_date = Some(date);
        self.view().day_detail(date)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Close the day detail and discard any unsent novelty
    pub fn close_date(&mut self) {
        self.selected_date = None;
        self.novelty_form = None;
    }

    /// Open an empty novelty form
    pub fn open_novelty_form(&mut self) {
        self.novelty_form = Some(NoveltyDraft::new());
    }

    pub fn close_novelty_form(&mut self) {
        self.novelty_form = None;
    }

    pub fn novelty_form(&self) -> Option<&NoveltyDraft> {
        self.novelty_form.as_ref()
    }

    pub fn toggle_child_for_novelty(&mut self, child_id: &str) {
        if let Some(form) = self.novelty_form.as_mut() {
            form.toggle_child(child_id);
        }
    }

    pub fn set_novelty_note(&mut self, note: impl Into<String>) {
        if let Some(form) = self.novelty_form.as_mut() {
            form.set_note(note);
        }
    }

    /// Record the open form as a pending novelty for the selected day.
    /// On a validation error the form stays open and nothing is recorded.
    pub fn submit_novelty(&mut self) -> Result<Novelty, NoveltyError> {
        let date = self.selected_date.ok_or(NoveltyError::NoDateSelected)?;
        let draft = self.novelty_form.clone().unwrap_or_default();
        draft.validate()?;

        self.novelty_form = None;
        let now = self.clock.now_utc();
        let novelty = self.novelties.submit(draft, date, now)?;
        info!(novelty_id = %novelty.id, date = %novelty.date, "Novelty submitted");
        Ok(novelty)
    }
}
