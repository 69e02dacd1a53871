//! IR repeat test: one `ir_send`, repeat signals for a fixed window, then `ir_stop`.
use futures_util::{Sink, Stream};
use tokio::time::{sleep_until, Instant};
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{error, info};

use super::command::{ir::IrSend, DockCommand, Request, SequenceId};
use super::schedule::{Action, RepeatSchedule};
use super::{log_incoming, DockClient};
use crate::config::RepeatConfig;
use crate::error::Result;

/// Outcome of one repeat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeatReport {
    /// Number of `ir_send` messages sent.
    pub sent: u32,
    /// Whether the `ir_stop` message went out.
    pub stopped: bool,
}

enum Event {
    Due,
    Incoming(Result<Option<super::Incoming>>),
}

/// Connects to the dock and plays the repeat schedule.
///
/// Fails only if the configuration is invalid. A dock that cannot be reached
/// and transport errors during the session are logged and end the session.
pub async fn run_repeat(config: &RepeatConfig) -> Result<RepeatReport> {
    let schedule = RepeatSchedule::new(config.duration, config.delay)?;
    let command = IrSend::new(config.code.clone()).with_repeat(config.repeat);
    info!(
        "Using dock command: {}",
        serde_json::to_string(&Request::dock(0, DockCommand::IrSend(command.clone())))?
    );

    let mut client = match DockClient::connect(&config.url).await {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            info!("Closed");
            return Ok(RepeatReport::default());
        }
    };
    Ok(play(&mut client, command, schedule).await)
}

/// Plays `schedule` on an open connection.
pub async fn play<S>(
    client: &mut DockClient<S>,
    command: IrSend,
    schedule: RepeatSchedule,
) -> RepeatReport
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    let mut report = RepeatReport::default();

    info!("Connected! Sending authentication");
    if let Err(e) = client.authenticate().await {
        error!("{}", e);
        close(client).await;
        return report;
    }

    let opened = Instant::now();
    let mut ids = SequenceId::default();
    let mut steps = schedule.into_iter().peekable();

    while let Some(step) = steps.peek().copied() {
        let event = tokio::select! {
            _ = sleep_until(opened + step.at) => Event::Due,
            incoming = client.next_message() => Event::Incoming(incoming),
        };

        match event {
            Event::Due => {
                steps.next();
                let outcome = match step.action {
                    Action::Repeat => {
                        let id = ids.next_id();
                        info!("Sending IR: {}", id);
                        let sent = client
                            .send(&Request::dock(id, DockCommand::IrSend(command.clone())))
                            .await;
                        if sent.is_ok() {
                            report.sent += 1;
                        }
                        sent
                    }
                    Action::Stop => {
                        let id = ids.next_id();
                        info!("Sending Stop: {}", id);
                        let sent = client.send(&Request::dock(id, DockCommand::IrStop)).await;
                        report.stopped = sent.is_ok();
                        sent
                    }
                    Action::Close => break,
                };
                if let Err(e) = outcome {
                    error!("{}", e);
                    break;
                }
            }
            Event::Incoming(Ok(Some(incoming))) => log_incoming(&incoming),
            Event::Incoming(Ok(None)) => {
                info!("Closed");
                return report;
            }
            Event::Incoming(Err(e)) => {
                error!("{}", e);
                break;
            }
        }
    }

    close(client).await;
    info!("Closed");
    report
}

async fn close<S>(client: &mut DockClient<S>)
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    if let Err(e) = client.close().await {
        error!("{}", e);
    }
}
