//! Shared foundation for the punchcard attendance pipeline.
//!
//! Holds the data model (punch events, daily summaries, the error log),
//! the crate-wide error type, CLI settings with the shift policy, and
//! timestamp parsing / formatting utilities.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AttendanceError, Result};
