//! Ingestion layer for the punchcard pipeline.
//!
//! Responsible for discovering and parsing raw punch log files,
//! validating rows, deduplicating punches into per-employee day lists,
//! reducing those into the daily summary, and answering search queries
//! over the aggregated result.

pub mod aggregator;
pub mod reader;
pub mod search;
pub mod validator;

pub use punch_core as core;
