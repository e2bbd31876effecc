//! Tabular sheet rendering of the summary and of search results.
//!
//! Fixed nine-column schema with a header row; boolean flags render as
//! `YES` / `No`. Written as CSV so any spreadsheet tool opens it.

use std::path::{Path, PathBuf};

use punch_core::models::{SearchRecord, Summary};
use punch_core::time_utils;
use punch_core::Result;
use tracing::info;

/// Header row of the fixed tabular schema.
pub const SHEET_HEADER: [&str; 9] = [
    "Date",
    "Emp Code",
    "First Punch",
    "Last Punch",
    "Total Punches",
    "Working Hours",
    "Late Entry",
    "Early Exit",
    "Single Punch",
];

/// Write the full summary as a sheet, one row per record in summary
/// order (ascending date, then emp_code).
pub fn save_summary_sheet(
    summary: &Summary,
    output_folder: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let path = prepare(output_folder, file_name)?;
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(SHEET_HEADER)?;
    for (date, record) in summary.records() {
        writer.write_record([
            date.to_string(),
            record.emp_code.clone(),
            time_utils::format_hhmm(record.first_punch),
            time_utils::format_hhmm(record.last_punch),
            record.total_punches.to_string(),
            time_utils::duration_hhmm(record.working_hours),
            yes_no(record.late_entry).to_string(),
            yes_no(record.early_exit).to_string(),
            yes_no(record.single_punch).to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Summary sheet saved to '{}'", path.display());
    Ok(path)
}

/// Write search results as a sheet. An empty result list produces a
/// single `No results found.` cell instead of the schema header.
pub fn save_search_sheet(
    results: &[SearchRecord],
    output_folder: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let path = prepare(output_folder, file_name)?;
    let mut writer = csv::Writer::from_path(&path)?;

    if results.is_empty() {
        writer.write_record(["No results found."])?;
        writer.flush()?;
        return Ok(path);
    }

    writer.write_record(SHEET_HEADER)?;
    for record in results {
        writer.write_record([
            record.date.to_string(),
            record.emp_code.clone(),
            time_utils::format_hhmm(record.first_punch),
            time_utils::format_hhmm(record.last_punch),
            record.total_punches.to_string(),
            format!("{:.2}", record.working_hours),
            yes_no(record.late_entry).to_string(),
            yes_no(record.early_exit).to_string(),
            yes_no(record.single_punch).to_string(),
        ])?;
    }
    writer.flush()?;

    info!("Search sheet saved to '{}'", path.display());
    Ok(path)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "No"
    }
}

fn prepare(output_folder: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_folder)?;
    Ok(output_folder.join(file_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
