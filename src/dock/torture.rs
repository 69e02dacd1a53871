//! IR torture test: send the same IR command at a fixed interval until stopped.
use std::future::Future;

use futures_util::{Sink, Stream};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{error, info};

use super::command::{ir::IrSend, DockCommand, Request, SequenceId};
use super::{log_incoming, DockClient};
use crate::config::TortureConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TortureReport {
    pub sent: u32,
}

/// Why a torture session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    RemoteClosed,
    TransportError,
}

enum Event {
    Shutdown,
    Tick,
    Incoming(Result<Option<super::Incoming>>),
}

/// Connects to the dock and sends until `shutdown` resolves or the
/// connection fails. A dock that cannot be reached ends the session with
/// nothing sent.
pub async fn run_torture<F>(config: &TortureConfig, shutdown: F) -> Result<TortureReport>
where
    F: Future<Output = ()>,
{
    check_interval(config)?;

    let mut client = match DockClient::connect(&config.url).await {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            let report = TortureReport::default();
            info!("Closed. Number of sent messages: {}", report.sent);
            return Ok(report);
        }
    };
    let command = IrSend::new(config.code.clone());
    let (report, _) = hammer(&mut client, command, config, shutdown).await?;
    Ok(report)
}

fn check_interval(config: &TortureConfig) -> Result<()> {
    if config.interval.is_zero() {
        return Err(Error::InvalidArgument(
            "send interval must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Runs the send loop on an open connection.
pub async fn hammer<S, F>(
    client: &mut DockClient<S>,
    command: IrSend,
    config: &TortureConfig,
    shutdown: F,
) -> Result<(TortureReport, StopReason)>
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
    F: Future<Output = ()>,
{
    check_interval(config)?;

    let mut report = TortureReport::default();
    let mut ids = SequenceId::default();

    if let Err(e) = client.authenticate().await {
        error!("{}", e);
        info!("Number of sent messages: {}", report.sent);
        return Ok((report, StopReason::TransportError));
    }

    let mut ticks = interval_at(Instant::now() + config.interval, config.interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let reason = loop {
        let event = tokio::select! {
            _ = &mut shutdown => Event::Shutdown,
            _ = ticks.tick() => Event::Tick,
            incoming = client.next_message() => Event::Incoming(incoming),
        };

        match event {
            Event::Shutdown => break StopReason::Shutdown,
            Event::Tick => {
                let id = ids.next_id();
                let request = Request::dock(id, DockCommand::IrSend(command.clone()));
                if let Err(e) = client.send(&request).await {
                    error!("{}", e);
                    break StopReason::TransportError;
                }
                report.sent += 1;
            }
            Event::Incoming(Ok(Some(incoming))) => log_incoming(&incoming),
            Event::Incoming(Ok(None)) => break StopReason::RemoteClosed,
            Event::Incoming(Err(e)) => {
                error!("{}", e);
                break StopReason::TransportError;
            }
        }
    };

    if reason != StopReason::RemoteClosed {
        if let Err(e) = client.close().await {
            error!("{}", e);
        }
    }
    info!("Closed. Number of sent messages: {}", report.sent);

    Ok((report, reason))
}
