//! Service Exception Model
//!
//! Days on which no transport runs (holidays, parent meetings, maintenance).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceException {
    pub id: u32,
    pub date: NaiveDate,
    pub reason: String,
    /// Whether every route is suspended, not only some children's
    pub affects_all: bool,
}

impl ServiceException {
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}
