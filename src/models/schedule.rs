//! Schedule Model
//!
//! Planned pickups and drop-offs for a child on a given calendar day.
//! Morning and afternoon runs carry different time fields, so the kind is a
//! tagged variant rather than a bag of optional strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time fields of a scheduled run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleKind {
    Morning {
        /// Bus leaves the depot
        departure_time: String,
        /// Bus at the child's home
        pickup_time: String,
        arrival_school: String,
    },
    Afternoon {
        departure_school: String,
        arrival_home: String,
    },
}

impl ScheduleKind {
    pub fn is_morning(&self) -> bool {
        matches!(self, ScheduleKind::Morning { .. })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ScheduleKind::Morning { .. } => "Mañana",
            ScheduleKind::Afternoon { .. } => "Tarde",
        }
    }
}

/// A planned run for one child on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: u32,
    pub child_id: String,
    pub child_name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub kind: ScheduleKind,
    /// Route and bus label, e.g. "Ruta Norte - Bus #12"
    pub route: String,
}

impl Schedule {
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_read_from_type_tag() {
        let morning: Schedule = serde_json::from_value(serde_json::json!({
            "id": 1,
            "child_id": "alfonso",
            "child_name": "Alfonso Miguel",
            "date": "2026-01-05",
            "type": "morning",
            "departure_time": "6:00 AM",
            "pickup_time": "6:30 AM",
            "arrival_school": "7:15 AM",
            "route": "Ruta Norte - Bus #12"
        }))
        .unwrap();
        assert!(morning.kind.is_morning());
        assert_eq!(morning.kind.display_name(), "Mañana");

        let afternoon: Schedule = serde_json::from_value(serde_json::json!({
            "id": 2,
            "child_id": "alfonso",
            "child_name": "Alfonso Miguel",
            "date": "2026-01-05",
            "type": "afternoon",
            "departure_school": "2:30 PM",
            "arrival_home": "3:15 PM",
            "route": "Ruta Norte - Bus #12"
        }))
        .unwrap();
        assert_eq!(
            afternoon.kind,
            ScheduleKind::Afternoon {
                departure_school: "2:30 PM".to_string(),
                arrival_home: "3:15 PM".to_string(),
            }
        );
    }

    #[test]
    fn test_afternoon_run_missing_fields_is_rejected() {
        let result: Result<Schedule, _> = serde_json::from_value(serde_json::json!({
            "id": 9,
            "child_id": "luis",
            "child_name": "Luis José",
            "date": "2026-01-09",
            "type": "afternoon",
            "route": "Ruta Sur - Bus #8"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_schedule_keeps_flat_shape() {
        let schedule = Schedule {
            id: 8,
            child_id: "luis".to_string(),
            child_name: "Luis José".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
            kind: ScheduleKind::Afternoon {
                departure_school: "2:00 PM".to_string(),
                arrival_home: "2:45 PM".to_string(),
            },
            route: "Ruta Sur - Bus #8".to_string(),
        };

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["type"], "afternoon");
        assert_eq!(json["arrival_home"], "2:45 PM");
        assert_eq!(json["date"], "2026-01-09");
    }
}
