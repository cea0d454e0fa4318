//! Models module for the bus tracker
//!
//! Contains all data records and their validation logic.

pub mod child;
pub mod filters;
pub mod novelty;
pub mod route_event;
pub mod route_history;
pub mod route_location;
pub mod schedule;
pub mod service_exception;

// Re-export commonly used types
pub use child::Child;
pub use filters::{ChildFilter, ChildOption, FilterError, FilterIcon, StatusFilter, StatusFilterOption};
pub use novelty::{Novelty, NoveltyBook, NoveltyDraft, NoveltyError, NoveltyStatus};
pub use route_event::RouteEvent;
pub use route_history::{RouteHistory, RouteStop, StopType, TripStatus, TripType};
pub use route_location::{GeoPoint, RouteLocations};
pub use schedule::{Schedule, ScheduleKind};
pub use service_exception::ServiceException;
