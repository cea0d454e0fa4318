//! Shared application state
//!
//! Everything the handlers need. The novelty book is the only mutable part.

use crate::models::NoveltyBook;
use crate::services::api_client::MockApiClient;
use crate::services::calendar_service::WeekStart;
use crate::services::time_provider::TimeProvider;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<MockApiClient>,
    pub novelties: Arc<RwLock<NoveltyBook>>,
    pub clock: Arc<dyn TimeProvider>,
    pub timezone: Tz,
    pub week_start: WeekStart,
}

impl AppState {
    pub fn new(client: Arc<MockApiClient>, clock: Arc<dyn TimeProvider>, timezone: Tz) -> Self {
        Self {
            client,
            novelties: Arc::new(RwLock::new(NoveltyBook::new())),
            clock,
            timezone,
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// Current day in the service timezone
    pub fn today(&self) -> NaiveDate {
        self.clock.today_in(self.timezone)
    }
}
