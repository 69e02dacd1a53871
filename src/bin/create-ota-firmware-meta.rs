//! Creates the firmware metadata file included in the hawkBit deployment.
//!
//! Release notes are read from `../../../doc/release/release-notes_<lang>.md`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dock_tools::config::FirmwareMetaConfig;
use dock_tools::ota::firmware;
use dock_tools::telemetry::init_tracing;
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(
    name = "create-ota-firmware-meta",
    version,
    about = "Generate OTA firmware metadata"
)]
struct Cli {
    firmware_file: PathBuf,

    /// Firmware version
    #[arg(value_name = "VERSION")]
    firmware_version: String,

    /// Release channel, e.g. DEVELOPMENT
    channel: String,

    output_file: PathBuf,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = FirmwareMetaConfig::new(
        cli.firmware_file,
        cli.firmware_version,
        cli.channel,
        cli.output_file,
    );
    firmware::generate(&config)
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

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positionals_are_read_in_order() {
        let cli = Cli::try_parse_from([
            "create-ota-firmware-meta",
            "dock.bin",
            "1.0.0",
            "DEVELOPMENT",
            "out.json",
        ])
        .unwrap();
        assert_eq!(cli.firmware_file, PathBuf::from("dock.bin"));
        assert_eq!(cli.firmware_version, "1.0.0");
        assert_eq!(cli.channel, "DEVELOPMENT");
        assert_eq!(cli.output_file, PathBuf::from("out.json"));

        assert!(Cli::try_parse_from(["create-ota-firmware-meta", "dock.bin", "1.0.0"]).is_err());
    }

    #[test]
    fn version_flag_still_works() {
        let err = Cli::try_parse_from(["create-ota-firmware-meta", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
