//! Error-log rendering: a count header, a separator rule, then one
//! diagnostic per line in arrival order – or a fixed "no errors"
//! message when the run was clean.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use punch_core::models::ErrorLog;
use punch_core::Result;
use tracing::info;

/// Write the collected diagnostics to `file_name` in the output folder.
pub fn save_error_log(errors: &ErrorLog, output_folder: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_folder)?;
    let path = output_folder.join(file_name);

    std::fs::write(&path, render(errors))?;
    info!(
        "Error log saved to '{}' ({} entries)",
        path.display(),
        errors.len()
    );
    Ok(path)
}

/// Render the log body.
fn render(errors: &ErrorLog) -> String {
    if errors.is_empty() {
        return "No errors found.".to_string();
    }

    let mut body = String::new();
    let _ = writeln!(body, "Total Errors: {}", errors.len());
    let _ = writeln!(body, "{}", "=".repeat(80));
    body.push('\n');
    for entry in errors.entries() {
        let _ = writeln!(body, "{entry}");
    }
    body
}

// ── Tests ─────────────────────────────────────────────────────────────────────
