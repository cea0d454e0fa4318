//! Calendar Service
//!
//! Builds the month grid of the calendar page and associates every day with
//! its service exception, its scheduled runs and the novelties parents have
//! submitted for it. All comparisons are on calendar days.

use crate::models::{ChildFilter, Novelty, Schedule, ServiceException};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// First column of the month grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column of `weekday` in the grid
    pub fn column(&self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Column headers, starting at the first column
    pub fn headers(&self) -> Vec<&'static str> {
        let skip = match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        };
        WEEKDAY_HEADERS.iter().cycle().skip(skip).take(7).copied().collect()
    }
}

/// A displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first_day: NaiveDate,
}

impl CalendarMonth {
    /// `None` for an invalid month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Every day of the month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first_day.iter_days().take_while(move |day| day.month() == month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    /// Header text, e.g. "enero 2026"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.first_day.month0() as usize], self.year())
    }
}

/// Main marker of a day cell. No-service days hide the schedule marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayIndicator {
    NoService,
    Scheduled,
    Free,
}

/// What a day cell shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub indicator: DayIndicator,
    /// Independent of `indicator`
    pub has_novelty: bool,
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Padding before the first day of the month
    Blank,
    Day(DaySummary),
}

impl CalendarCell {
    pub fn summary(&self) -> Option<&DaySummary> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(summary) => Some(summary),
        }
    }
}

/// Everything shown when a day is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub exception: Option<ServiceException>,
    pub novelties: Vec<Novelty>,
    /// Empty on no-service days
    pub schedules: Vec<Schedule>,
    /// No exception and nothing scheduled
    pub no_routes: bool,
}

/// Calendar associations over the data currently loaded
#[derive(Debug, Clone, Copy)]
pub struct CalendarView<'a> {
    schedules: &'a [Schedule],
    exceptions: &'a [ServiceException],
    novelties: &'a [Novelty],
    child: &'a ChildFilter,
    today: NaiveDate,
    week_start: WeekStart,
}

impl<'a> CalendarView<'a> {
    pub fn new(
        schedules: &'a [Schedule],
        exceptions: &'a [ServiceException],
        novelties: &'a [Novelty],
        child: &'a ChildFilter,
        today: NaiveDate,
    ) -> Self {
        Self {
            schedules,
            exceptions,
            novelties,
            child,
            today,
            week_start: WeekStart::default(),
        }
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    /// The exception registered for `date`; the first one wins
    pub fn exception_for(&self, date: NaiveDate) -> Option<&'a ServiceException> {
        self.exceptions.iter().find(|exception| exception.falls_on(date))
    }

    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exception_for(date).is_some()
    }

    /// Runs on `date` for the selected child, or for everyone
    pub fn schedules_for_date(&self, date: NaiveDate) -> Vec<&'a Schedule> {
        self.schedules
            .iter()
            .filter(|schedule| schedule.falls_on(date) && self.child.matches(&schedule.child_id))
            .collect()
    }

    pub fn has_schedule(&self, date: NaiveDate) -> bool {
        self.schedules
            .iter()
            .any(|schedule| schedule.falls_on(date) && self.child.matches(&schedule.child_id))
    }

    pub fn novelties_for_date(&self, date: NaiveDate) -> Vec<&'a Novelty> {
        self.novelties.iter().filter(|novelty| novelty.falls_on(date)).collect()
    }

    pub fn has_novelty(&self, date: NaiveDate) -> bool {
        self.novelties.iter().any(|novelty| novelty.falls_on(date))
    }

    pub fn indicator(&self, date: NaiveDate) -> DayIndicator {
        if self.is_exception(date) {
            DayIndicator::NoService
        } else if self.has_schedule(date) {
            DayIndicator::Scheduled
        } else {
            DayIndicator::Free
        }
    }

    pub fn day_summary(&self, date: NaiveDate) -> DaySummary {
        DaySummary {
            date,
            day: date.day(),
            is_today: date == self.today,
            indicator: self.indicator(date),
            has_novelty: self.has_novelty(date),
        }
    }

    /// Leading blanks up to the first weekday, then one cell per day
    pub fn month_grid(&self, month: CalendarMonth) -> Vec<CalendarCell> {
        let blanks = self.week_start.column(month.first_day().weekday()) as usize;

        std::iter::repeat(CalendarCell::Blank)
            .take(blanks)
            .chain(month.days().map(|date| CalendarCell::Day(self.day_summary(date))))
            .collect()
    }

    pub fn day_detail(&self, date: NaiveDate) -> DayDetail {
        let exception = self.exception_for(date).cloned();
        let schedules: Vec<Schedule> = if exception.is_some() {
            Vec::new()
        } else {
            self.schedules_for_date(date).into_iter().cloned().collect()
        };

        DayDetail {
            date,
            no_routes: exception.is_none() && schedules.is_empty(),
            novelties: self.novelties_for_date(date).into_iter().cloned().collect(),
            exception,
            schedules,
        }
    }

    /// Exceptions from today on, earliest first
    pub fn upcoming_exceptions(&self) -> Vec<&'a ServiceException> {
        let mut upcoming: Vec<_> = self
            .exceptions
            .iter()
            .filter(|exception| exception.date >= self.today)
            .collect();
        upcoming.sort_by_key(|exception| exception.date);
        upcoming
    }
}
