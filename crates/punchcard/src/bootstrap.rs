use punch_core::models::ErrorLog;
use punch_core::settings::{SearchRequest, Settings};
use punch_core::AttendanceError;
use punch_data::{aggregator, reader, search};
use punch_report::{error_log, json, sheet};
use punch_report::{ERROR_LOG_FILE, SUMMARY_JSON_FILE, SUMMARY_SHEET_FILE};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to an [`EnvFilter`] directive; `--debug`
/// overrides it. Falls back to `"info"` when the level string is not
/// recognised.
pub fn setup_logging(log_level: &str, debug: bool) -> anyhow::Result<()> {
    let normalised = if debug {
        "debug"
    } else {
        match log_level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARNING" => "warn",
            "ERROR" => "error",
            _ => "info",
        }
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Pipeline ───────────────────────────────────────────────────────────────────

/// Run the full batch pipeline: ingest, aggregate, export, and
/// optionally search.
///
/// The two fatal directory conditions short-circuit straight to
/// writing the error log; everything else is collected per row/file
/// and never stops the run.
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let ingest = match reader::read_log_files(&settings.log_folder) {
        Ok(ingest) => ingest,
        Err(err) if err.is_fatal_directory() => {
            return halt_with_error_log(settings, err);
        }
        Err(err) => return Err(err.into()),
    };

    let summary = aggregator::summarize(&ingest.punches, &settings.shift_policy());

    let json_path = json::save_summary_json(&summary, &settings.output_folder, SUMMARY_JSON_FILE)?;
    println!("Summary saved to '{}'.", json_path.display());

    let sheet_path =
        sheet::save_summary_sheet(&summary, &settings.output_folder, SUMMARY_SHEET_FILE)?;
    println!("Summary sheet saved to '{}'.", sheet_path.display());

    let log_path = error_log::save_error_log(&ingest.errors, &settings.output_folder, ERROR_LOG_FILE)?;
    println!("Error log saved to '{}'.", log_path.display());

    if settings.search.is_empty() {
        println!("Default report generated. No specific search performed.");
        return Ok(());
    }

    // A malformed request already printed its usage message; fall back
    // to the full export that just completed.
    let Some(request) = SearchRequest::from_args(&settings.search) else {
        return Ok(());
    };
    run_search(settings, &summary, &request)
}

/// Execute one search request and export its results under
/// query-specific file names.
fn run_search(
    settings: &Settings,
    summary: &punch_core::models::Summary,
    request: &SearchRequest,
) -> anyhow::Result<()> {
    let results = search::run(summary, request);

    if results.is_empty() {
        println!("No results found for {}.", request.describe());
        return Ok(());
    }

    let stem = request.file_stem();
    json::save_search_json(&results, &settings.output_folder, &format!("{stem}.json"))?;
    sheet::save_search_sheet(&results, &settings.output_folder, &format!("{stem}.csv"))?;
    println!(
        "Search returned {} record(s); results saved under '{}'.",
        results.len(),
        settings.output_folder.join(&stem).display()
    );

    Ok(())
}

/// Fatal directory condition: record the reason, write the error log,
/// and stop without exporting a summary.
fn halt_with_error_log(settings: &Settings, err: AttendanceError) -> anyhow::Result<()> {
    tracing::warn!("Ingestion halted: {}", err);

    let mut errors = ErrorLog::default();
    errors.push(err.to_string());

    let path = error_log::save_error_log(&errors, &settings.output_folder, ERROR_LOG_FILE)?;
    println!("Error log saved to '{}'.", path.display());
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
