use std::{io, path::PathBuf};

use tokio_tungstenite::tungstenite;

/// Errors produced by the dock tooling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input file is absent.
    #[error("File does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A checksum sidecar without a leading hash token.
    #[error("Invalid hash file: {}", .0.display())]
    InvalidHashFile(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
