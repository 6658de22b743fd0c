use crate::registry::registrant::{BROKER_ID, Registrant};

/// Endpoint of the registered broker, if any.
///
/// Only meaningful in broker dissemination mode. A later broker
/// registration overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokerSlot {
    endpoint: Option<(String, u16)>,
}

impl BrokerSlot {
    pub fn new() -> Self {
        Self { endpoint: None }
    }

    pub fn set(&mut self, addr: impl Into<String>, port: u16) {
        self.endpoint = Some((addr.into(), port));
    }

    /// Any broker registration counts, including an empty address or port 0.
    pub fn is_set(&self) -> bool {
        self.endpoint.is_some()
    }

    /// The broker as a lookup entry, reported under the `"Broker"` identity.
    pub fn as_registrant(&self) -> Option<Registrant> {
        self.endpoint
            .as_ref()
            .map(|(addr, port)| Registrant::new(BROKER_ID, addr.clone(), *port))
    }
}
