use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;

use crate::time_utils;

// ── Shift policy ──────────────────────────────────────────────────────────────

/// Shift thresholds consumed by the aggregation engine.
///
/// Passed in explicitly instead of living as process-wide constants so
/// tests can exercise alternate shift policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPolicy {
    /// Nominal shift start (informational).
    pub shift_start: NaiveTime,
    /// Nominal shift end (informational).
    pub shift_end: NaiveTime,
    /// First punch strictly later than this flags `late_entry`.
    pub late_threshold: NaiveTime,
    /// Last punch strictly earlier than this flags `early_exit`.
    pub early_threshold: NaiveTime,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            shift_start: hms(9, 0),
            shift_end: hms(18, 0),
            late_threshold: hms(9, 30),
            early_threshold: hms(17, 0),
        }
    }
}

fn hms(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid threshold time")
}

// ── Settings (CLI) ────────────────────────────────────────────────────────────

/// Attendance punch-log processing and reporting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "punchcard",
    about = "Aggregate raw punch logs into daily attendance reports",
    version
)]
pub struct Settings {
    /// Folder containing the raw .log / .csv punch files
    #[arg(long, default_value = "attendance_logs")]
    pub log_folder: PathBuf,

    /// Folder the reports are written to
    #[arg(long, default_value = "attendance_reports")]
    pub output_folder: PathBuf,

    /// Late-entry threshold override (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    pub late_threshold: Option<NaiveTime>,

    /// Early-exit threshold override (HH:MM)
    #[arg(long, value_parser = parse_time_arg)]
    pub early_threshold: Option<NaiveTime>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Run a summary search after the full export. Forms:
    /// employee <code> | date <date> | employee_and_date <code> <date>
    /// | date_range <code> <start> <end>
    #[arg(long, num_args = 1.., value_name = "TYPE ARGS")]
    pub search: Vec<String>,
}

impl Settings {
    /// Build the shift policy, applying any CLI threshold overrides on
    /// top of the defaults.
    pub fn shift_policy(&self) -> ShiftPolicy {
        let mut policy = ShiftPolicy::default();
        if let Some(late) = self.late_threshold {
            policy.late_threshold = late;
        }
        if let Some(early) = self.early_threshold {
            policy.early_threshold = early;
        }
        policy
    }
}

/// clap value parser for HH:MM / HH:MM:SS threshold arguments.
fn parse_time_arg(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}

// ── SearchRequest ─────────────────────────────────────────────────────────────

/// A structured search request produced by the CLI adapter and consumed
/// by the search layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Employee { emp_code: String },
    Date { date: String },
    EmployeeAndDate { emp_code: String, date: String },
    DateRange { emp_code: String, start: String, end: String },
}

impl SearchRequest {
    /// Interpret the raw `--search` argument list.
    ///
    /// Unrecognised or incomplete shapes print a usage message and
    /// yield `None` – the run then falls back to full-export-only
    /// behaviour; it never aborts.
    pub fn from_args(args: &[String]) -> Option<Self> {
        let request = match args {
            [kind, rest @ ..] => match (kind.as_str(), rest) {
                ("employee", [code]) => Some(SearchRequest::Employee {
                    emp_code: code.clone(),
                }),
                ("date", [date]) => Some(SearchRequest::Date { date: date.clone() }),
                ("employee_and_date", [code, date]) => Some(SearchRequest::EmployeeAndDate {
                    emp_code: code.clone(),
                    date: date.clone(),
                }),
                ("date_range", [code, start, end]) => Some(SearchRequest::DateRange {
                    emp_code: code.clone(),
                    start: start.clone(),
                    end: end.clone(),
                }),
                _ => None,
            },
            [] => None,
        };

        if request.is_none() {
            eprintln!("Invalid search request: {}", args.join(" "));
            print_search_usage();
        }
        request
    }

    /// File stem for query-specific export files, with date-shaped
    /// arguments resolved through the epoch plausibility window.
    pub fn file_stem(&self) -> String {
        match self {
            SearchRequest::Employee { emp_code } => format!("search_emp_{emp_code}"),
            SearchRequest::Date { date } => {
                format!("search_date_{}", time_utils::epoch_to_date(date))
            }
            SearchRequest::EmployeeAndDate { emp_code, date } => {
                format!("search_emp_{emp_code}_date_{}", time_utils::epoch_to_date(date))
            }
            SearchRequest::DateRange {
                emp_code,
                start,
                end,
            } => format!(
                "search_emp_{emp_code}_{}_to_{}",
                time_utils::epoch_to_date(start),
                time_utils::epoch_to_date(end)
            ),
        }
    }

    /// Human-readable description for "no results" notices.
    pub fn describe(&self) -> String {
        match self {
            SearchRequest::Employee { emp_code } => {
                format!("employee code '{emp_code}'")
            }
            SearchRequest::Date { date } => {
                format!("date '{}'", time_utils::epoch_to_date(date))
            }
            SearchRequest::EmployeeAndDate { emp_code, date } => format!(
                "employee code '{emp_code}' and date '{}'",
                time_utils::epoch_to_date(date)
            ),
            SearchRequest::DateRange {
                emp_code,
                start,
                end,
            } => format!(
                "employee '{emp_code}' from {} to {}",
                time_utils::epoch_to_date(start),
                time_utils::epoch_to_date(end)
            ),
        }
    }
}

fn print_search_usage() {
    eprintln!("Usage:");
    eprintln!("  punchcard --search employee <emp_code>");
    eprintln!("  punchcard --search date <date-or-epoch>");
    eprintln!("  punchcard --search employee_and_date <emp_code> <date-or-epoch>");
    eprintln!("  punchcard --search date_range <emp_code> <start_date> <end_date>");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
