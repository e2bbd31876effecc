use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::time_utils;

// ── PunchEvent ────────────────────────────────────────────────────────────────

/// Identity triple used to detect duplicate punches:
/// (employee code, seconds since epoch, device).
pub type PunchIdentity = (String, i64, String);

/// A single validated clock-in/out event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Alphanumeric employee code, e.g. `E001`.
    pub employee_code: String,
    /// Naive local instant of the punch, second precision.
    pub timestamp: NaiveDateTime,
    /// Device that recorded the punch, e.g. `Main Gate`.
    pub device: String,
}

impl PunchEvent {
    /// The deduplication identity: two events with an identical triple
    /// are the same physical punch and must be counted once.
    pub fn identity(&self) -> PunchIdentity {
        (
            self.employee_code.clone(),
            self.timestamp.and_utc().timestamp(),
            self.device.clone(),
        )
    }

    /// Local calendar date of the punch – the grouping key for
    /// daily aggregation.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ── DailySummaryRecord ────────────────────────────────────────────────────────

/// One employee's attendance summary for one calendar date.
///
/// Derived and read-only: one record per (employee, date) pair with at
/// least one punch. Times serialise as `HH:MM`; `working_hours` holds
/// whole seconds internally and serialises as `HH:MM` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryRecord {
    pub emp_code: String,
    /// Earliest punch of the day.
    #[serde(with = "hhmm_time")]
    pub first_punch: NaiveTime,
    /// Latest punch of the day. Always >= `first_punch`.
    #[serde(with = "hhmm_time")]
    pub last_punch: NaiveTime,
    pub total_punches: u32,
    /// Seconds between first and last punch, truncated to whole seconds.
    #[serde(with = "hhmm_duration")]
    pub working_hours: i64,
    /// First punch strictly later than the late threshold (default 09:30).
    pub late_entry: bool,
    /// Last punch strictly earlier than the early threshold (default 17:00).
    pub early_exit: bool,
    /// Exactly one punch recorded that day (no paired exit).
    pub single_punch: bool,
}

impl DailySummaryRecord {
    /// Worked duration as fractional hours rounded to two decimals –
    /// the search-export rendering of the same underlying seconds.
    pub fn fractional_hours(&self) -> f64 {
        time_utils::fractional_hours(self.working_hours)
    }
}

// ── SearchRecord ──────────────────────────────────────────────────────────────

/// A flat search result: a [`DailySummaryRecord`] together with its
/// source date, so every query shape exports uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub date: NaiveDate,
    pub emp_code: String,
    #[serde(with = "hhmm_time")]
    pub first_punch: NaiveTime,
    #[serde(with = "hhmm_time")]
    pub last_punch: NaiveTime,
    pub total_punches: u32,
    /// Fractional hours rounded to two decimals.
    pub working_hours: f64,
    pub late_entry: bool,
    pub early_exit: bool,
    pub single_punch: bool,
}

impl SearchRecord {
    /// Flatten a summary record under its date.
    pub fn from_summary(date: NaiveDate, record: &DailySummaryRecord) -> Self {
        Self {
            date,
            emp_code: record.emp_code.clone(),
            first_punch: record.first_punch,
            last_punch: record.last_punch,
            total_punches: record.total_punches,
            working_hours: record.fractional_hours(),
            late_entry: record.late_entry,
            early_exit: record.early_exit,
            single_punch: record.single_punch,
        }
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// The canonical aggregated artifact: date → summary records, ascending
/// date order, emp_code order within each date. Immutable after
/// construction; the sole input to search and export sinks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    pub days: BTreeMap<NaiveDate, Vec<DailySummaryRecord>>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of distinct dates with at least one record.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// All records flattened in export order: ascending date, then
    /// ascending emp_code within each date.
    pub fn records(&self) -> impl Iterator<Item = (NaiveDate, &DailySummaryRecord)> + '_ {
        self.days
            .iter()
            .flat_map(|(date, records)| records.iter().map(move |r| (*date, r)))
    }
}

// ── ErrorLog ──────────────────────────────────────────────────────────────────

/// Append-only ordered collection of human-readable diagnostics from
/// parsing and validation. Collecting an entry never aborts ingestion.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    entries: Vec<String>,
}

impl ErrorLog {
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in arrival order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

// ── Serde adapters ────────────────────────────────────────────────────────────

/// Serialise a [`NaiveTime`] as zero-padded `HH:MM`.
mod hhmm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::time_utils::format_hhmm(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// Serialise whole seconds as a floored `HH:MM` duration.
mod hhmm_duration {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(secs: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::time_utils::duration_hhmm(*secs))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::time_utils::parse_duration_hhmm(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{s}'")))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
