//! The `transport` module is responsible for handling network communication
//! with publishers, subscribers and brokers via WebSockets.
//!
//! It defines the JSON messaging protocol, routes decoded requests to the
//! dispatcher and runs the WebSocket server itself.

pub mod message;
pub mod router;
pub mod websocket;

pub use message::{ClientMessage, ServerMessage};
pub use websocket::{serve, start_websocket_server};

#[cfg(test)]
mod tests;
#[cfg(test)]
mod websocket_tests;
