//! Torture test app for continuously sending an IR code to a dock.
//!
//! Runs until the connection fails or Ctrl-C is pressed.
//!
//! Example:
//! `ir-torture ws://172.16.16.123/ws "17;0x2A4C0A8A0282;48;1"`

use std::process::ExitCode;

use clap::Parser;
use dock_tools::config::TortureConfig;
use dock_tools::dock::torture::run_torture;
use dock_tools::telemetry::init_tracing;
use tracing::{error, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "ir-torture",
    version,
    about = "Send an IR command to a dock every 100ms"
)]
struct Cli {
    /// Dock WebSocket URL, e.g. ws://UCD3-xxxxxx.local:946/
    url: String,

    /// IR code; defaults to a hex test code
    code: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(Level::INFO);

    let config = TortureConfig::new(cli.url, cli.code.map(Into::into));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    match run_torture(&config, shutdown).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
