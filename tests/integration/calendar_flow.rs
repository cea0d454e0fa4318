//! Calendar page and route feed driven through the mock client

use crate::common::{instant_client, school_day_clock};
use bus_tracker::models::{ChildFilter, NoveltyError};
use bus_tracker::services::{
    CalendarMonth, CalendarPage, DayIndicator, MockApiClient, RouteEventFeed, SchoolBusApi, SimulatedLatency,
};
use bus_tracker::store::MockDataStore;
use chrono::NaiveDate;
use chrono_tz::America::Bogota;
use std::sync::Arc;
use std::time::Duration;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

#[tokio::test]
async fn test_parent_reports_absence() {
    let mut page = CalendarPage::new(instant_client(), school_day_clock(), Bogota);
    assert!(page.load().await);
    assert!(page.load_error().is_none());

    page.select_child(ChildFilter::Child("alfonso".to_string()));
    let detail = page.select_date(date(8));
    assert_eq!(detail.schedules.len(), 1);
    assert!(!detail.no_routes);

    page.open_novelty_form();
    page.toggle_child_for_novelty("alfonso");
    page.set_novelty_note("Cita con el odontólogo");
    page.submit_novelty().unwrap();

    let cell = page
        .month_grid()
        .into_iter()
        .filter_map(|cell| cell.summary().cloned())
        .find(|summary| summary.date == date(8))
        .unwrap();
    assert!(cell.has_novelty);
    assert_eq!(cell.indicator, DayIndicator::Scheduled);
}

#[tokio::test]
async fn test_second_submission_needs_a_new_form() {
    let mut page = CalendarPage::new(instant_client(), school_day_clock(), Bogota);
    page.load().await;
    page.select_date(date(15));

    page.open_novelty_form();
    page.toggle_child_for_novelty("luis");
    page.set_novelty_note("Enfermo");
    page.submit_novelty().unwrap();

    // The form closed after the first submission
    assert_eq!(page.submit_novelty().unwrap_err(), NoveltyError::NoChildrenSelected);
    assert_eq!(page.novelties().len(), 1);
}

#[tokio::test]
async fn test_close_date_discards_open_form() {
    let mut page = CalendarPage::new(instant_client(), school_day_clock(), Bogota);
    page.select_date(date(16));
    page.open_novelty_form();
    page.toggle_child_for_novelty("luis");

    page.close_date();
    assert!(page.selected_date().is_none());
    assert!(page.novelty_form().is_none());
}

#[tokio::test]
async fn test_navigation_keeps_loaded_data() {
    let mut page = CalendarPage::new(instant_client(), school_day_clock(), Bogota);
    page.load().await;

    page.next_month();
    assert_eq!(page.month(), CalendarMonth::new(2026, 2).unwrap());
    assert!(page
        .month_grid()
        .iter()
        .filter_map(|cell| cell.summary())
        .all(|summary| summary.indicator == DayIndicator::Free));

    page.previous_month();
    assert_eq!(page.month().title(), "enero 2026");
}

#[tokio::test(start_paused = true)]
async fn test_load_waits_for_slowest_call() {
    let store = Arc::new(MockDataStore::sample().unwrap());
    let client = Arc::new(MockApiClient::new(store).with_latency(SimulatedLatency::PerOperation));
    let mut page = CalendarPage::new(client, school_day_clock(), Bogota);

    let started = tokio::time::Instant::now();
    assert!(page.load().await);
    let elapsed = started.elapsed();

    // children, schedules and exceptions run concurrently
    assert!(elapsed >= Duration::from_millis(350));
    assert!(elapsed < Duration::from_millis(600));
}

#[tokio::test]
async fn test_closing_route_events() {
    let client = instant_client();
    let mut feed = RouteEventFeed::new(client.get_route_events("luis").await.unwrap());
    assert_eq!(feed.len(), 5);

    let closed = feed.close(2).unwrap();
    assert_eq!(closed.message, "El bus llegó al colegio");
    assert_eq!(feed.len(), 4);
    assert_eq!(feed.events()[2].message, "El bus está en 2 paradas");

    assert!(feed.close(10).is_none());
    assert_eq!(feed.len(), 4);
}
