//! Services module for the bus tracker
//!
//! Client access, calendar association, history filtering and the page-level
//! state built on top of them.

pub mod api_client;
pub mod calendar_page;
pub mod calendar_service;
pub mod history_filter;
pub mod request_tracker;
pub mod route_tracking;
pub mod time_provider;

// Re-export commonly used services
pub use api_client::{ClientError, ClientResult, MockApiClient, Operation, SchoolBusApi, SimulatedLatency};
pub use calendar_page::{CalendarLoad, CalendarPage, CalendarSnapshot};
pub use calendar_service::{
    CalendarCell, CalendarMonth, CalendarView, DayDetail, DayIndicator, DaySummary, WeekStart,
};
pub use history_filter::{filter_history, HistoryParams, HistoryQuery};
pub use request_tracker::{RequestTicket, RequestTracker};
pub use route_tracking::RouteEventFeed;
pub use time_provider::{MockTimeProvider, SystemTimeProvider, TimeProvider};
