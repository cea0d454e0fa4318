//! Route Event Model
//!
//! Live notifications about a child's current trip ("boarded the bus",
//! "bus is 2 stops away").

use serde::{Deserialize, Serialize};

/// A single notification in a child's live route feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEvent {
    pub message: String,

    /// Clock time as reported by the bus, e.g. "05:50 pm"
    pub time: String,
}

impl RouteEvent {
    pub fn new(message: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            time: time.into(),
        }
    }
}
