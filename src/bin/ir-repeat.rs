//! IR repeat test app. Sends an IR command, followed by repeat commands for a
//! given duration, then stops.
//!
//! Example:
//! `ir-repeat ws://172.16.16.123/ws "17;0x2A4C0A8A0282;48;3" 3`

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dock_tools::config::RepeatConfig;
use dock_tools::dock::repeat::run_repeat;
use dock_tools::telemetry::init_tracing;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "ir-repeat",
    version,
    about = "Send an IR command with repeat signals to a dock"
)]
struct Cli {
    /// Dock WebSocket URL, e.g. ws://UCD3-xxxxxx.local:946/
    url: String,

    /// IR code (hex, Global Caché sendir or Pronto)
    code: String,

    /// Repeat count sent with the IR command
    repeat: u32,

    /// Total duration of the repeat phase in milliseconds
    #[arg(default_value_t = 2000)]
    duration: u64,

    /// Delay between repeat commands in milliseconds
    #[arg(default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
    delay: u64,
}

impl From<Cli> for RepeatConfig {
    fn from(cli: Cli) -> Self {
        let mut config = RepeatConfig::new(cli.url, cli.code, cli.repeat);
        config.duration = Duration::from_millis(cli.duration);
        config.delay = Duration::from_millis(cli.delay);
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = RepeatConfig::from(Cli::parse());
    init_tracing(Level::INFO);

    match run_repeat(&config).await {
        Ok(report) => {
            info!(
                "Sent {} repeat command(s), stop {}",
                report.sent,
                if report.stopped { "sent" } else { "not sent" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
