//! Export sinks for the punchcard pipeline.
//!
//! Every sink consumes the immutable summary (or a flat search-result
//! list) and writes to the output folder, creating it on demand. The
//! sinks never reorder records – they preserve the ascending
//! date / emp_code ordering the aggregation engine guarantees.

pub mod error_log;
pub mod json;
pub mod sheet;

/// Default file names in the output folder.
pub const SUMMARY_JSON_FILE: &str = "attendance_summary.json";
pub const SUMMARY_SHEET_FILE: &str = "attendance_summary.csv";
pub const ERROR_LOG_FILE: &str = "error_log.txt";
