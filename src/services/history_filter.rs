//! History Filter
//!
//! Narrows the trip history by child and outcome. Both predicates are
//! optional; the result keeps the input order.

use crate::models::{ChildFilter, FilterError, RouteHistory, StatusFilter};
use serde::Deserialize;

/// Query as sent by the history page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub child: ChildFilter,
    pub status: StatusFilter,
}

impl HistoryQuery {
    pub fn new(child: ChildFilter, status: StatusFilter) -> Self {
        Self { child, status }
    }

    pub fn for_child(child_id: &str) -> Self {
        Self {
            child: ChildFilter::Child(child_id.to_string()),
            status: StatusFilter::All,
        }
    }

    pub fn matches(&self, record: &RouteHistory) -> bool {
        self.child.matches(&record.child_id) && self.status.matches(record.status)
    }
}

/// Raw query-string parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub child_id: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<HistoryParams> for HistoryQuery {
    type Error = FilterError;

    fn try_from(params: HistoryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            child: ChildFilter::from_query(params.child_id.as_deref()),
            status: StatusFilter::from_query(params.status.as_deref())?,
        })
    }
}

/// Records matching both predicates, in their original order
pub fn filter_history<'a>(history: &'a [RouteHistory], query: &HistoryQuery) -> Vec<&'a RouteHistory> {
    history.iter().filter(|record| query.matches(record)).collect()
}
