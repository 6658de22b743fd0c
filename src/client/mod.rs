//! The `client` module is the participant side of the discovery protocol.
//!
//! Publishers, subscribers and brokers use `DiscoveryClient` to register,
//! poll readiness and look up publishers over the WebSocket transport.

pub mod discovery_client;
pub use discovery_client::DiscoveryClient;
