//! Filter Models
//!
//! Child and status selectors shared by the history and calendar views.
//! Both accept the `"all"` sentinel, which disables the predicate.

use crate::models::child::Child;
use crate::models::route_history::TripStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel value meaning "do not filter"
pub const ALL: &str = "all";

/// Filter errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Unknown trip status: {0}")]
    UnknownStatus(String),
}

/// Which child a view is restricted to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ChildFilter {
    #[default]
    All,
    Child(String),
}

impl ChildFilter {
    /// Absent, empty and `"all"` all mean no filtering
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => ChildFilter::All,
            Some(id) => ChildFilter::Child(id.to_string()),
        }
    }

    pub fn matches(&self, child_id: &str) -> bool {
        match self {
            ChildFilter::All => true,
            ChildFilter::Child(id) => id == child_id,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChildFilter::All => ALL,
            ChildFilter::Child(id) => id,
        }
    }
}

impl fmt::Display for ChildFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which trip outcome a history view is restricted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Status(TripStatus),
}

impl StatusFilter {
    pub fn from_query(value: Option<&str>) -> Result<Self, FilterError> {
        match value.map(str::trim) {
            None | Some("") => Ok(StatusFilter::All),
            Some(other) => other.parse(),
        }
    }

    pub fn matches(&self, status: TripStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ALL {
            return Ok(StatusFilter::All);
        }
        TripStatus::from_str(value)
            .map(StatusFilter::Status)
            .map_err(|_| FilterError::UnknownStatus(value.to_string()))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Status(status) => write!(f, "{status}"),
        }
    }
}

/// Entry of the child selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildOption {
    pub id: String,
    pub name: String,
}

impl ChildOption {
    /// Selector entries: the "all children" entry first, then every child
    pub fn selector(children: &[Child]) -> Vec<ChildOption> {
        std::iter::once(ChildOption {
            id: ALL.to_string(),
            name: "Todos los hijos".to_string(),
        })
        .chain(children.iter().map(|child| ChildOption {
            id: child.id.clone(),
            name: child.name.clone(),
        }))
        .collect()
    }
}

/// Icons available to the history status chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumIter)]
pub enum FilterIcon {
    Route,
    CheckCircle,
    XCircle,
    UserX,
}

impl FilterIcon {
    /// Icon-set glyph name rendered by the front-end
    pub fn glyph(&self) -> &'static str {
        match self {
            FilterIcon::Route => "route",
            FilterIcon::CheckCircle => "check-circle",
            FilterIcon::XCircle => "x-circle",
            FilterIcon::UserX => "user-x",
        }
    }
}

/// Entry of the history status selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilterOption {
    /// `"all"` or a trip status
    pub id: String,
    pub label: String,
    pub icon: FilterIcon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_child_filter_sentinel() {
        assert_eq!(ChildFilter::from_query(None), ChildFilter::All);
        assert_eq!(ChildFilter::from_query(Some("all")), ChildFilter::All);
        assert_eq!(ChildFilter::from_query(Some("")), ChildFilter::All);
        assert_eq!(
            ChildFilter::from_query(Some("luis")),
            ChildFilter::Child("luis".to_string())
        );

        assert!(ChildFilter::All.matches("anyone"));
        assert!(ChildFilter::Child("luis".to_string()).matches("luis"));
        assert!(!ChildFilter::Child("luis".to_string()).matches("alfonso"));
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!(StatusFilter::from_query(None).unwrap(), StatusFilter::All);
        assert_eq!(StatusFilter::from_query(Some("all")).unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_query(Some("no_show")).unwrap(),
            StatusFilter::Status(TripStatus::NoShow)
        );
        assert_eq!(
            StatusFilter::from_query(Some("delayed")).unwrap_err(),
            FilterError::UnknownStatus("delayed".to_string())
        );
        assert_eq!(StatusFilter::Status(TripStatus::Cancelled).to_string(), "cancelled");
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        let glyphs: Vec<_> = FilterIcon::iter().map(|icon| icon.glyph()).collect();
        assert_eq!(glyphs, ["route", "check-circle", "x-circle", "user-x"]);
    }

    #[test]
    fn test_unknown_icon_name_fails_to_load() {
        let result: Result<StatusFilterOption, _> = serde_json::from_value(serde_json::json!({
            "id": "all", "label": "Todas", "icon": "Sparkles"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_filters_can_key_a_set() {
        let selected: std::collections::HashSet<StatusFilter> = ["completed", "all", "completed", "no_show"]
            .iter()
            .map(|value| value.parse().unwrap())
            .collect();

        assert_eq!(selected.len(), 3);
        assert!(selected.contains(&StatusFilter::Status(TripStatus::NoShow)));
        assert!(!selected.contains(&StatusFilter::Status(TripStatus::Cancelled)));
    }
}
