//! WebSocket client for the dock test API.
pub mod command;
pub mod repeat;
pub mod schedule;
pub mod torture;

use command::Request;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::config::DEFAULT_AUTH_TOKEN;
use crate::error::Result;

/// Something received from the dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// Text frame, kept verbatim.
    Text(String),
    /// Binary frame length.
    Binary(usize),
}

/// One connection to a dock.
///
/// Generic over the transport so the session logic can run on any
/// WebSocket stream; [`DockClient::connect`] produces the TCP one.
pub struct DockClient<S> {
    stream: S,
}

impl DockClient<WebSocketStream<MaybeTlsStream<TcpStream>>> {
    /// Opens the WebSocket connection to `url`, e.g. `ws://172.16.16.123/ws`.
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, response) = tokio_tungstenite::connect_async(url).await?;
        debug!("WebSocket handshake: {}", response.status());
        Ok(Self::new(stream))
    }
}

impl<S> DockClient<S>
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>>
        + Sink<Message, Error = tungstenite::Error>
        + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Sends the authentication message.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.send(&Request::auth(DEFAULT_AUTH_TOKEN)).await
    }

    /// Serializes `request` and sends it as one text frame.
    pub async fn send(&mut self, request: &Request) -> Result<()> {
        let text = serde_json::to_string(request)?;
        self.stream.send(Message::text(text)).await?;
        Ok(())
    }

    /// Waits for the next data frame.
    ///
    /// Returns `Ok(None)` once the dock closed the connection. Ping and pong
    /// frames are skipped.
    pub async fn next_message(&mut self) -> Result<Option<Incoming>> {
        while let Some(message) = self.stream.next().await {
            match message? {
                Message::Text(text) => return Ok(Some(Incoming::Text(text.to_string()))),
                Message::Binary(data) => return Ok(Some(Incoming::Binary(data.len()))),
                Message::Close(frame) => {
                    if let Some(frame) = frame {
                        info!("Close frame: {} {}", u16::from(frame.code), frame.reason);
                    }
                    return Ok(None);
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }

    /// Starts the closing handshake and flushes it.
    pub async fn close(&mut self) -> Result<()> {
        match self.stream.close().await {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Logs one incoming message the way both test clients report it.
pub(crate) fn log_incoming(incoming: &Incoming) {
    match incoming {
        Incoming::Text(text) => info!("received: {}", text),
        Incoming::Binary(len) => info!("received: <{} bytes binary>", len),
    }
}
