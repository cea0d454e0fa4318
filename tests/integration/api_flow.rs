//! HTTP API flows a parent goes through

use crate::common::create_test_server;
use axum::http::StatusCode;
use bus_tracker::config::Config;
use serde_json::{json, Value};

fn day_cell<'a>(month: &'a Value, date: &str) -> &'a Value {
    month["cells"]
        .as_array()
        .unwrap()
        .iter()
        .find(|cell| cell["date"] == date)
        .unwrap()
}

#[tokio::test]
async fn test_selector_lists_all_first() {
    let server = create_test_server(&Config::default());

    let options: Value = server.get("/api/calendar/children").await.json();
    let ids: Vec<&str> = options
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|option| option["id"].as_str())
        .collect();

    assert_eq!(ids, ["all", "alfonso", "luis"]);
    assert_eq!(options[0]["name"], "Todos los hijos");
}

#[tokio::test]
async fn test_child_filter_changes_month_markers() {
    let server = create_test_server(&Config::default());

    let everyone: Value = server.get("/api/calendar/month/2026/1").await.json();
    assert_eq!(day_cell(&everyone, "2026-01-08")["indicator"], "scheduled");

    let luis: Value = server
        .get("/api/calendar/month/2026/1")
        .add_query_param("child", "luis")
        .await
        .json();
    assert_eq!(luis["child"], "luis");
    assert_eq!(day_cell(&luis, "2026-01-08")["indicator"], "free");
    assert_eq!(day_cell(&luis, "2026-01-09")["indicator"], "scheduled");
    // No-service days win regardless of the selected child
    assert_eq!(day_cell(&luis, "2026-01-12")["indicator"], "no_service");
}

#[tokio::test]
async fn test_current_month_follows_clock() {
    let server = create_test_server(&Config::default());

    let month: Value = server.get("/api/calendar/month").await.json();
    assert_eq!(month["year"], 2026);
    assert_eq!(month["month"], 1);
    assert_eq!(day_cell(&month, "2026-01-12")["is_today"], true);
    assert_eq!(day_cell(&month, "2026-01-11")["is_today"], false);
}

#[tokio::test]
async fn test_monday_week_start() {
    let config = Config {
        week_start: bus_tracker::services::WeekStart::Monday,
        ..Config::default()
    };
    let server = create_test_server(&config);

    let month: Value = server.get("/api/calendar/month/2026/1").await.json();
    assert_eq!(month["headers"][0], "Lun");
    let blanks = month["cells"]
        .as_array()
        .unwrap()
        .iter()
        .take_while(|cell| cell["kind"] == "blank")
        .count();
    assert_eq!(blanks, 3);
}

#[tokio::test]
async fn test_upcoming_exceptions_start_today() {
    let server = create_test_server(&Config::default());

    let upcoming: Value = server.get("/api/calendar/exceptions/upcoming").await.json();
    let dates: Vec<&str> = upcoming
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|exception| exception["date"].as_str())
        .collect();

    assert_eq!(dates, ["2026-01-12", "2026-01-20"]);
}

#[tokio::test]
async fn test_novelty_marks_the_day() {
    let server = create_test_server(&Config::default());

    let response = server
        .post("/api/calendar/novelties")
        .json(&json!({
            "date": "2026-01-07",
            "child_ids": ["luis", "alfonso", "luis"],
            "note": "  Viaje familiar  "
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let novelty: Value = response.json();
    assert_eq!(novelty["child_ids"], json!(["luis", "alfonso"]));
    assert_eq!(novelty["note"], "Viaje familiar");

    let month: Value = server.get("/api/calendar/month/2026/1").await.json();
    let cell = day_cell(&month, "2026-01-07");
    assert_eq!(cell["has_novelty"], true);
    assert_eq!(cell["indicator"], "scheduled");
    assert_eq!(day_cell(&month, "2026-01-08")["has_novelty"], false);

    let day: Value = server.get("/api/calendar/day/2026-01-07").await.json();
    assert_eq!(day["schedules"].as_array().map(Vec::len), Some(2));
    assert_eq!(day["novelties"][0]["status"], "pending");
}

#[tokio::test]
async fn test_rejected_novelty_reports_reason() {
    let server = create_test_server(&Config::default());

    let response = server
        .post("/api/calendar/novelties")
        .json(&json!({ "date": "2026-01-07", "note": "Viaje familiar" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "InvalidNovelty");
    assert!(body["timestamp"].is_number());

    let novelties: Value = server.get("/api/calendar/novelties").await.json();
    assert_eq!(novelties, json!([]));
}

#[tokio::test]
async fn test_history_for_one_child() {
    let server = create_test_server(&Config::default());

    let history: Value = server
        .get("/api/history")
        .add_query_param("child_id", "alfonso")
        .await
        .json();

    let records = history.as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|record| record["child_id"] == "alfonso"));
}
