//! Data store module
//!
//! The in-memory dataset every client call reads from.

pub mod mock_data;

pub use mock_data::{DataError, MockDataStore};
