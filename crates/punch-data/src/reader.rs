//! Punch log discovery and parsing.
//!
//! Reads heterogeneous `.log` / `.csv` files from the input folder,
//! detects each file's format from its first line, and folds every
//! validated row into the deduplicating punch store. Row and file
//! failures are collected in the error log and never abort the run.

use std::path::{Path, PathBuf};

use punch_core::models::{ErrorLog, PunchEvent};
use punch_core::time_utils;
use punch_core::{AttendanceError, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::aggregator::DailyPunches;

/// Header labels that mark a whitespace-delimited file's first line as
/// a header row (case-sensitive).
const HEADER_LABELS: &[&str] = &["emp_code", "employee_code", "code"];

// ── Raw rows ──────────────────────────────────────────────────────────────────

/// One candidate row as read from a file, before validation.
///
/// Delimited files deserialise this by header name; missing columns
/// default to empty strings so they fail the presence check rather
/// than the parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub emp_code: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub device: String,
}

impl RawRecord {
    /// Trim surrounding whitespace from every field.
    fn trimmed(self) -> Self {
        Self {
            emp_code: self.emp_code.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            timestamp: self.timestamp.trim().to_string(),
            device: self.device.trim().to_string(),
        }
    }
}

// ── Ingest result ─────────────────────────────────────────────────────────────

/// Everything produced by one ingestion pass over the log folder.
#[derive(Debug, Default)]
pub struct Ingest {
    /// Deduplicated punches grouped per employee per day.
    pub punches: DailyPunches,
    /// Ordered diagnostics from parsing and validation.
    pub errors: ErrorLog,
}

// ── File discovery ────────────────────────────────────────────────────────────

/// Find all `.log` / `.csv` files directly under `log_folder`, sorted
/// by path for deterministic file-then-row processing order.
///
/// A missing folder or a folder with no eligible files are the two
/// fatal conditions of the pipeline.
pub fn find_log_files(log_folder: &Path) -> Result<Vec<PathBuf>> {
    if !log_folder.is_dir() {
        return Err(AttendanceError::LogFolderMissing(log_folder.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(log_folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && matches!(
                    entry.path().extension().and_then(|ext| ext.to_str()),
                    Some("log") | Some("csv")
                )
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();

    if files.is_empty() {
        return Err(AttendanceError::NoLogFiles(log_folder.to_path_buf()));
    }

    Ok(files)
}

// ── Ingestion driver ──────────────────────────────────────────────────────────

/// Read every eligible file under `log_folder` into an [`Ingest`].
///
/// Only the two directory conditions surface as `Err`; any failure
/// reading or parsing a single file becomes one error-log entry and
/// processing continues with the next file.
pub fn read_log_files(log_folder: &Path) -> Result<Ingest> {
    let files = find_log_files(log_folder)?;

    let mut ingest = Ingest::default();
    for file in &files {
        if let Err(err) = process_file(file, &mut ingest) {
            warn!("Failed to process {}: {}", file.display(), err);
            ingest.errors.push(format!(
                "Error processing file '{}': {}",
                file.display(),
                err
            ));
        }
    }

    debug!(
        "Ingested {} unique punches from {} files ({} diagnostics)",
        ingest.punches.punch_count(),
        files.len(),
        ingest.errors.len()
    );

    Ok(ingest)
}

/// Parse one file, dispatching on the detected format. The format is
/// decided once per file from its first line: a comma means delimited
/// text with a header row, anything else is whitespace tokens.
fn process_file(path: &Path, ingest: &mut Ingest) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|source| AttendanceError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let first_line = content.lines().next().unwrap_or("");
    if first_line.contains(',') {
        process_delimited(path, &content, ingest)
    } else {
        process_whitespace(path, &content, ingest);
        Ok(())
    }
}

// ── Delimited files ───────────────────────────────────────────────────────────

/// Comma-delimited with a header row defining the field names.
/// Standard quoting rules apply; data rows are physical lines 2..
fn process_delimited(path: &Path, content: &str, ingest: &mut Ingest) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        let row_num = idx + 2;
        match row {
            Ok(raw) => fold_row(raw, path, row_num, ingest),
            Err(err) => ingest.errors.push(format!(
                "Row {} in file '{}' could not be parsed: {}",
                row_num,
                path.display(),
                err
            )),
        }
    }

    Ok(())
}

// ── Whitespace files ──────────────────────────────────────────────────────────

/// Whitespace-token format: blank lines and `#` comments are skipped
/// silently; a recognised header label on the first line skips that
/// line; rows need at least 6 tokens.
fn process_whitespace(path: &Path, content: &str, ingest: &mut Ingest) {
    let has_header = content
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .map(|token| HEADER_LABELS.contains(&token))
        .unwrap_or(false);

    for (idx, line) in content.lines().enumerate() {
        let row_num = idx + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if row_num == 1 && has_header {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            ingest.errors.push(format!(
                "Row {} in file '{}' has insufficient columns.",
                row_num,
                path.display()
            ));
            continue;
        }

        // Token 3 alone is the timestamp in epoch form; otherwise the
        // timestamp spans tokens 3 and 4 (date + time). Everything
        // after it, joined by single spaces, is the device.
        let epoch_form = tokens[3].bytes().all(|b| b.is_ascii_digit());
        let (timestamp, device_tokens) = if epoch_form {
            (tokens[3].to_string(), &tokens[4..])
        } else {
            (format!("{} {}", tokens[3], tokens[4]), &tokens[5..])
        };

        let raw = RawRecord {
            emp_code: tokens[0].to_string(),
            first_name: tokens[1].to_string(),
            last_name: tokens[2].to_string(),
            timestamp,
            device: device_tokens.join(" "),
        };
        fold_row(raw, path, row_num, ingest);
    }
}

// ── Row folding ───────────────────────────────────────────────────────────────

/// Validate, normalise and record one raw row. Exactly one error-log
/// entry per dropped row; duplicate punches are dropped silently.
fn fold_row(raw: RawRecord, path: &Path, row_num: usize, ingest: &mut Ingest) {
    let raw = raw.trimmed();

    if let Err(entry) = crate::validator::validate_record(&raw, path, row_num) {
        ingest.errors.push(entry);
        return;
    }

    let Some(timestamp) = time_utils::parse_timestamp(&raw.timestamp) else {
        ingest.errors.push(format!(
            "Row {} in file '{}' has an invalid timestamp.",
            row_num,
            path.display()
        ));
        return;
    };

    let event = PunchEvent {
        employee_code: raw.emp_code,
        timestamp,
        device: raw.device,
    };
    if !ingest.punches.record(event) {
        debug!(
            "Duplicate punch dropped (row {} in {})",
            row_num,
            path.display()
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
