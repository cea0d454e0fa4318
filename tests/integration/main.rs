//! Integration Tests
//!
//! End-to-end flows through the HTTP API and the calendar page state.

mod api_flow;
mod calendar_flow;
mod common;
