mod bootstrap;

use anyhow::Result;
use clap::Parser;
use punch_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level, settings.debug)?;

    tracing::info!("punchcard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Log folder: {}, output folder: {}",
        settings.log_folder.display(),
        settings.output_folder.display()
    );

    bootstrap::run(&settings)
}
