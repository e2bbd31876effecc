//! JSON rendering of the summary and of search results.

use std::path::{Path, PathBuf};

use punch_core::models::{SearchRecord, Summary};
use punch_core::Result;
use tracing::info;

/// Write the full nested summary (date → records) as pretty-printed
/// JSON. Returns the path written.
pub fn save_summary_json(
    summary: &Summary,
    output_folder: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let path = prepare(output_folder, file_name)?;
    let text = serde_json::to_string_pretty(summary)?;
    std::fs::write(&path, text)?;
    info!("Summary saved to '{}'", path.display());
    Ok(path)
}

/// Write a flat search-result list as pretty-printed JSON.
pub fn save_search_json(
    results: &[SearchRecord],
    output_folder: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    let path = prepare(output_folder, file_name)?;
    let text = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, text)?;
    info!("Search results saved to '{}'", path.display());
    Ok(path)
}

fn prepare(output_folder: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_folder)?;
    Ok(output_folder.join(file_name))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
