//! Creates a hawkBit DDI software deployment object in `deployment.json`.
//!
//! Every deployment file needs `.MD5SUM`, `.sha1sum` and `.sha256sum`
//! sidecars next to it. The hash is the first whitespace-separated token of
//! each sidecar; an empty sidecar is an error and nothing is written.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dock_tools::config::DeploymentMetaConfig;
use dock_tools::ota::hawkbit;
use dock_tools::telemetry::init_tracing;
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(
    name = "create-ota-hawkbit-meta",
    version,
    about = "Generate a hawkBit deployment object"
)]
struct Cli {
    /// Firmware version
    #[arg(value_name = "VERSION")]
    firmware_version: String,

    #[arg(required = true)]
    deployment_files: Vec<PathBuf>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DeploymentMetaConfig::new(cli.firmware_version, cli.deployment_files);
    hawkbit::generate(&config)
        .with_context(|| format!("cannot create {}", config.output.display()))?;
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
