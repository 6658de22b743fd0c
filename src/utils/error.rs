//! The `error` module defines the error type used outside the registry core.
//!
//! The registry, readiness and dispatch modules never fail: logical failures
//! such as "not ready yet" travel in response payloads. `DiscoveryError`
//! covers configuration, networking and decoding in the server and client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("unknown dissemination strategy '{0}' (expected Direct or Broker)")]
    UnknownDissemination(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("invalid JSON message: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
