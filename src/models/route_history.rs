//! Route History Model
//!
//! Finished trips with their stop-by-stop detail. Records are read-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a trip
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TripType {
    /// Home to school
    Ida,
    /// School to home
    Regreso,
}

impl TripType {
    pub fn display_name(&self) -> &'static str {
        match self {
            TripType::Ida => "Ida",
            TripType::Regreso => "Regreso",
        }
    }
}

/// Outcome of a trip
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TripStatus {
    Completed,
    Cancelled,
    /// The child never boarded
    NoShow,
}

impl TripStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            TripStatus::Completed => "Completada",
            TripStatus::Cancelled => "Cancelada",
            TripStatus::NoShow => "No abordó",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    Pickup,
    Dropoff,
    School,
}

/// One stop of a trip, in the order the bus served it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    pub location: String,
    pub time: String,
    pub stop_type: StopType,
}

/// A completed, cancelled or missed trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHistory {
    pub id: String,
    pub date: NaiveDate,
    pub child_id: String,
    pub child_name: String,
    pub trip_type: TripType,
    pub status: TripStatus,
    pub departure_time: String,
    /// "-" when the trip never arrived
    pub arrival_time: String,
    pub total_duration: String,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
    /// Free-text incidents reported by the route monitor
    #[serde(default)]
    pub novelties: Vec<String>,
}

impl RouteHistory {
    pub fn has_novelties(&self) -> bool {
        !self.novelties.is_empty()
    }

    /// Stops where the child was picked up or dropped off, skipping the school
    pub fn home_side_stops(&self) -> impl Iterator<Item = &RouteStop> {
        self.stops
            .iter()
            .filter(|stop| stop.stop_type != StopType::School)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_parses_snake_case() {
        assert_eq!(TripStatus::from_str("no_show").unwrap(), TripStatus::NoShow);
        assert_eq!(TripStatus::from_str("completed").unwrap(), TripStatus::Completed);
        assert!(TripStatus::from_str("lost").is_err());
        assert_eq!(TripStatus::NoShow.to_string(), "no_show");
    }

    #[test]
    fn test_history_deserializes_from_dataset_shape() {
        let record: RouteHistory = serde_json::from_value(serde_json::json!({
            "id": "4",
            "date": "2024-01-12",
            "child_id": "alfonso",
            "child_name": "Alfonso Miguel",
            "trip_type": "ida",
            "status": "cancelled",
            "departure_time": "6:15 AM",
            "arrival_time": "-",
            "total_duration": "-",
            "novelties": ["Ruta cancelada"]
        }))
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());
        assert_eq!(record.status, TripStatus::Cancelled);
        assert!(record.stops.is_empty());
        assert!(record.has_novelties());
    }
}
