//! The `dispatch` module is the façade the transport drives.
//!
//! `DiscoveryHandler` has one method per request kind; `Dispatcher`
//! implements it on top of the registry and readiness modules and turns
//! each request into exactly one `Response`.

pub mod dispatcher;
pub mod response;

pub use dispatcher::{DiscoveryHandler, Dispatcher};
pub use response::{Response, Status};
