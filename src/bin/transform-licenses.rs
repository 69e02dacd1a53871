//! Creates the license overview page in markdown for the Dock firmware.
//!
//! Run from the license documentation directory: templates are read from
//! `_templates/`, module license files from `<module>/<licenseFile>` and the
//! firmware license from `../../LICENSE`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dock_tools::config::LicenseDocConfig;
use dock_tools::license;
use dock_tools::telemetry::init_tracing;
use tracing::{error, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "transform-licenses",
    version,
    about = "Generate the license overview markdown"
)]
struct Cli {
    /// License manifest, e.g. licenses.json
    licenses: PathBuf,

    /// Markdown output file
    output: PathBuf,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = LicenseDocConfig::new(cli.licenses, cli.output);
    let summary = license::generate(&config)
        .with_context(|| format!("cannot create {}", config.output.display()))?;
    if !summary.missing.is_empty() {
        warn!(
            "{} of {} modules without license text: {}",
            summary.missing.len(),
            summary.modules,
            summary.missing.join(", ")
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(Level::INFO);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
