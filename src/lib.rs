//! # PopSub Discovery
//!
//! `popsub_discovery` is the rendezvous service of a publish/subscribe
//! system. Publishers, subscribers and an optional broker register their
//! endpoints and topics here; subscribers later ask which endpoints serve a
//! topic and whether every expected participant has registered.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `registry`: Topic-indexed publishers and subscribers, plus the set of all known publishers.
//! - `readiness`: Dissemination mode, registration counters, broker slot and readiness evaluation.
//! - `dispatch`: The `DiscoveryHandler` upcall interface and the `Dispatcher` that implements it.
//! - `transport`: JSON messages over WebSocket and the server loop.
//! - `client`: A WebSocket client for participants.
//! - `config`: Handles loading and managing server configuration.
//! - `utils`: Error type and logging setup.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod readiness;
pub mod registry;
pub mod transport;
pub mod utils;
