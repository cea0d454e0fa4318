//! School bus tracker backend
//!
//! Children, live route events, trip history and the pickup calendar,
//! served from an in-memory dataset through a delayed mock client.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
