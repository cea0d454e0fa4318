//! Route Tracking
//!
//! The live event feed shown over the map. Parents can hide the whole feed
//! or dismiss single events; dismissed events are gone for this feed only.

use crate::models::RouteEvent;

#[derive(Debug, Clone)]
pub struct RouteEventFeed {
    events: Vec<RouteEvent>,
    show_events: bool,
}

impl RouteEventFeed {
    pub fn new(events: Vec<RouteEvent>) -> Self {
        Self {
            events,
            show_events: true,
        }
    }

    pub fn events(&self) -> &[RouteEvent] {
        &self.events
    }

    /// Events to draw, empty while the feed is hidden
    pub fn visible_events(&self) -> &[RouteEvent] {
        if self.show_events {
            &self.events
        } else {
            &[]
        }
    }

    pub fn is_showing_events(&self) -> bool {
        self.show_events
    }

    pub fn toggle_show_events(&mut self) {
        self.show_events = !self.show_events;
    }

    /// Dismiss the event at `index`; out-of-range indices are ignored
    pub fn close(&mut self, index: usize) -> Option<RouteEvent> {
        (index < self.events.len()).then(|| self.events.remove(index))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
