//! Mock Data Store
//!
//! Static records for children, live events, trip history, schedules,
//! exceptions and bus positions. The sample dataset is embedded in the
//! binary; an alternative JSON file with the same shape may be loaded instead.

use crate::models::{
    Child, RouteEvent, RouteHistory, RouteLocations, Schedule, ServiceException, StatusFilterOption,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

const SAMPLE_DATA: &str = include_str!("../../data/mock_data.json");

/// Errors raised while loading a dataset
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate child id in dataset: {0}")]
    DuplicateChild(String),

    #[error("Record {record} references unknown child {child_id}")]
    UnknownChild { record: String, child_id: String },
}

/// Read-only dataset shared by every client
#[derive(Debug, Clone, Deserialize)]
pub struct MockDataStore {
    children: Vec<Child>,
    #[serde(default)]
    route_events: HashMap<String, Vec<RouteEvent>>,
    #[serde(default)]
    route_history: Vec<RouteHistory>,
    #[serde(default)]
    schedules: Vec<Schedule>,
    #[serde(default)]
    exceptions: Vec<ServiceException>,
    #[serde(default)]
    route_locations: HashMap<String, RouteLocations>,
    #[serde(default)]
    status_filters: Vec<StatusFilterOption>,
}

impl MockDataStore {
    /// The embedded sample dataset
    pub fn sample() -> Result<Self, DataError> {
        Self::from_json(SAMPLE_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let store: Self = serde_json::from_str(json)?;
        store.validate()?;

        debug!(
            children = store.children.len(),
            history = store.route_history.len(),
            schedules = store.schedules.len(),
            exceptions = store.exceptions.len(),
            "Dataset loaded"
        );

        Ok(store)
    }

    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check cross-record references
    fn validate(&self) -> Result<(), DataError> {
        let mut ids = HashSet::new();
        for child in &self.children {
            if !ids.insert(child.id.as_str()) {
                return Err(DataError::DuplicateChild(child.id.clone()));
            }
        }

        for record in &self.route_history {
            if !ids.contains(record.child_id.as_str()) {
                return Err(DataError::UnknownChild {
                    record: format!("history {}", record.id),
                    child_id: record.child_id.clone(),
                });
            }
        }

        for schedule in &self.schedules {
            if !ids.contains(schedule.child_id.as_str()) {
                return Err(DataError::UnknownChild {
                    record: format!("schedule {}", schedule.id),
                    child_id: schedule.child_id.clone(),
                });
            }
        }

        // Only the first exception of a day is ever shown
        let mut exception_days = HashSet::new();
        for exception in &self.exceptions {
            if !exception_days.insert(exception.date) {
                warn!(
                    exception_id = exception.id,
                    date = %exception.date,
                    "More than one exception registered for the same day"
                );
            }
        }

        Ok(())
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|child| child.id == id)
    }

    /// Live events for a child; empty when the child has none
    pub fn route_events(&self, child_id: &str) -> &[RouteEvent] {
        self.route_events
            .get(child_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn route_history(&self) -> &[RouteHistory] {
        &self.route_history
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn exceptions(&self) -> &[ServiceException] {
        &self.exceptions
    }

    pub fn route_locations(&self, child_id: &str) -> Option<&RouteLocations> {
        self.route_locations.get(child_id)
    }

    pub fn status_filters(&self) -> &[StatusFilterOption] {
        &self.status_filters
    }
}
