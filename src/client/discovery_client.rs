use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;
use tungstenite::protocol::Message as WsMessage;

use crate::dispatch::Status;
use crate::readiness::{Readiness, ReadinessState};
use crate::registry::{Registrant, Role};
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::{DiscoveryError, Result};

/// A connection to the discovery service.
///
/// Each method sends one request and waits for its single response, so
/// calls on one client are strictly sequential.
pub struct DiscoveryClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl DiscoveryClient {
    /// Connect to a discovery service, e.g. `ws://127.0.0.1:5555`.
    pub async fn connect(url: &str) -> Result<Self> {
        let (ws, _response) = connect_async(url).await?;
        debug!("connected to discovery service at {url}");
        Ok(Self { ws })
    }

    pub async fn register(
        &mut self,
        role: Role,
        info: Registrant,
        topics: &[String],
    ) -> Result<Status> {
        let request = ClientMessage::Register {
            role,
            info,
            topics: topics.to_vec(),
        };
        match self.request(&request).await? {
            ServerMessage::RegisterResp { status } => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    pub async fn is_ready(&mut self) -> Result<Readiness> {
        match self.request(&ClientMessage::IsReady).await? {
            ServerMessage::IsReadyResp { status, reason, .. } => Ok(Readiness {
                state: match status {
                    Status::Success => ReadinessState::Ready,
                    Status::Failure => ReadinessState::NotReady,
                },
                reason,
            }),
            other => Err(unexpected(other)),
        }
    }

    pub async fn lookup_publishers(&mut self, topics: &[String]) -> Result<Vec<Registrant>> {
        let request = ClientMessage::LookupPubByTopic {
            topics: topics.to_vec(),
        };
        match self.request(&request).await? {
            ServerMessage::LookupPubByTopicResp { publishers } => Ok(publishers),
            other => Err(unexpected(other)),
        }
    }

    pub async fn all_publishers(&mut self) -> Result<Vec<Registrant>> {
        match self.request(&ClientMessage::LookupAllPubs).await? {
            ServerMessage::LookupAllPubsResp { publishers } => Ok(publishers),
            other => Err(unexpected(other)),
        }
    }

    /// Polls `is_ready` until it succeeds or `max_attempts` polls have failed.
    pub async fn wait_until_ready(&mut self, interval: Duration, max_attempts: usize) -> Result<bool> {
        for attempt in 1..=max_attempts {
            let readiness = self.is_ready().await?;
            if readiness.is_ready() {
                return Ok(true);
            }
            debug!(
                "not ready after attempt {attempt}: {}",
                readiness.reason.describe()
            );
            tokio::time::sleep(interval).await;
        }
        Ok(false)
    }

    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }

    /// Sends a raw text frame and returns the reply. Used for requests the
    /// typed methods cannot express.
    pub async fn send_raw(&mut self, text: &str) -> Result<ServerMessage> {
        self.ws.send(WsMessage::text(text.to_string())).await?;
        self.next_reply().await
    }

    async fn request(&mut self, request: &ClientMessage) -> Result<ServerMessage> {
        let text = serde_json::to_string(request)?;
        self.ws.send(WsMessage::text(text)).await?;
        match self.next_reply().await? {
            ServerMessage::Error { message } => Err(DiscoveryError::UnexpectedResponse(message)),
            reply => Ok(reply),
        }
    }

    async fn next_reply(&mut self) -> Result<ServerMessage> {
        while let Some(frame) = self.ws.next().await {
            match frame? {
                WsMessage::Text(text) => return Ok(serde_json::from_str(text.as_str())?),
                WsMessage::Close(_) => break,
                _ => continue,
            }
        }
        Err(DiscoveryError::ConnectionClosed)
    }
}

fn unexpected(reply: ServerMessage) -> DiscoveryError {
    DiscoveryError::UnexpectedResponse(format!("{reply:?}"))
}
