//! WebSocket transport
//!
//! This file implements a minimal WebSocket server that translates protocol
//! JSON messages into dispatcher upcalls. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Decode each text frame and hand it to the router
//! - Emit exactly one response per request through a per-connection writer
//!   task, so the dispatcher lock is never held across network I/O

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::{Arc, Mutex, PoisonError};

use crate::dispatch::Dispatcher;
use crate::transport::message::ServerMessage;
use crate::transport::router::handle_text;
use crate::utils::error::Result;

/// Binds `addr` and serves discovery requests until the listener fails.
pub async fn start_websocket_server(addr: String, dispatcher: Arc<Mutex<Dispatcher>>) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    let mode = dispatcher.lock().unwrap_or_else(PoisonError::into_inner).mode();
    info!("Discovery service listening on ws://{addr} ({mode} dissemination)");
    serve(listener, dispatcher).await
}

/// Serves discovery requests on an already bound listener.
pub async fn serve(listener: TcpListener, dispatcher: Arc<Mutex<Dispatcher>>) -> Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!("accepted connection from {peer}");
                spawn(handle_connection(stream, dispatcher.clone()));
            }
            Err(e) => warn!("Failed to accept connection: {e}"),
        }
    }
}

async fn handle_connection(stream: TcpStream, dispatcher: Arc<Mutex<Dispatcher>>) {
    let client_id = format!("client-{}", uuid::Uuid::new_v4());

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            error!("WebSocket handshake error: {e}");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    {
        let client_id = client_id.clone();
        spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    error!("Failed to send message to {client_id}: {e}");
                    break;
                }
            }
            debug!("Send loop closed for {client_id}");
        });
    }

    info!("{client_id} connected");

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => {
                let response = handle_text(&*dispatcher, &client_id, text.as_str());
                emit(&tx, &client_id, &response);
            }
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Read error from {client_id}: {e}");
                break;
            }
        }
    }

    info!("{client_id} disconnected");
}

/// Queues `response` for delivery to the connection behind `tx`.
pub fn emit(tx: &UnboundedSender<WsMessage>, client_id: &str, response: &ServerMessage) {
    let text = match serde_json::to_string(response) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize response for {client_id}: {e}");
            return;
        }
    };
    if let Err(e) = tx.send(WsMessage::text(text)) {
        error!("Failed to queue response for {client_id}: {e}");
    }
}
