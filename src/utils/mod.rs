//! The `utils` module provides the error type and logging setup shared by
//! the server, the client and the binary.

pub mod error;
pub mod logging;
