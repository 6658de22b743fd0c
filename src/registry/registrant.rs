//! Registrant definitions
//!
//! `Registrant` is the canonical wire/internal representation of a
//! participant: an identity plus the endpoint where it can be reached.
//!
//! Notes on fields:
//! - `id`: caller-supplied identity, never checked for uniqueness
//! - `addr`: host or IP address the participant listens on
//! - `port`: port the participant listens on
//!
//! Equality and hashing cover all three fields, which is what the
//! publisher set relies on for deduplication.

use serde::{Deserialize, Serialize};

/// Identity reported for the broker in topic lookups.
pub const BROKER_ID: &str = "Broker";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Registrant {
    pub id: String,
    pub addr: String,
    pub port: u16,
}

impl Registrant {
    pub fn new(id: impl Into<String>, addr: impl Into<String>, port: u16) -> Self {
        Self {
            id: id.into(),
            addr: addr.into(),
            port,
        }
    }
}

impl std::fmt::Display for Registrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}", self.id, self.addr, self.port)
    }
}

/// The part a registrant plays in the system.
///
/// `Both` is used by the broker, which proxies between publishers and
/// subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Publisher,
    Subscriber,
    Both,
}
