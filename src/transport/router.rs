//! Request routing
//!
//! Turns decoded `ClientMessage`s into `DiscoveryHandler` upcalls and
//! raw text frames into exactly one `ServerMessage` each, including frames
//! that fail to decode.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::dispatch::{DiscoveryHandler, Response};
use crate::transport::message::{ClientMessage, ServerMessage};

/// Invokes the upcall matching `request`.
pub fn route<H: DiscoveryHandler + ?Sized>(handler: &mut H, request: ClientMessage) -> Response {
    match request {
        ClientMessage::Register { role, info, topics } => handler.on_register(role, info, &topics),
        ClientMessage::IsReady => handler.on_is_ready(),
        ClientMessage::LookupPubByTopic { topics } => handler.on_lookup_publishers_by_topic(&topics),
        ClientMessage::LookupAllPubs => handler.on_list_all_publishers(),
    }
}

/// Decodes one text frame and answers it.
///
/// The handler lock is held only while the request is applied, so a
/// registration is fully visible or not at all.
pub fn handle_text<H: DiscoveryHandler>(handler: &Mutex<H>, client_id: &str, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(request) => {
            debug!("{client_id} sent {request:?}");
            let response = {
                let mut handler = handler.lock().unwrap_or_else(PoisonError::into_inner);
                route(&mut *handler, request)
            };
            if !response.is_success() {
                debug!("{client_id} answered with {response:?}");
            }
            response.into()
        }
        Err(err) => {
            warn!(
                "Invalid client message from {client_id}: {err} | {}",
                &text.chars().take(100).collect::<String>()
            );
            ServerMessage::Error {
                message: format!("invalid request: {err}"),
            }
        }
    }
}
