//! Request dispatcher
//!
//! `Dispatcher` owns all discovery state (topic registry, counters, broker
//! slot) and implements `DiscoveryHandler`, the upcall interface the
//! transport invokes once per decoded request.
//!
//! Concurrency and usage notes:
//! - Every method is synchronous and never blocks. The transport holds the
//!   dispatcher behind a lock (`Arc<Mutex<Dispatcher>>`) so mutations are
//!   serialized and lookups always see the latest completed registration.
//! - Callers should not hold the lock across network I/O: take the
//!   `Response`, release the lock, then send it.

use tracing::{debug, info};

use crate::dispatch::response::{Response, Status};
use crate::readiness::{BrokerSlot, Counters, DisseminationMode, Readiness, ReasonCode, evaluate};
use crate::registry::{Registrant, Role, TopicRegistry};

/// One method per request kind. Each call yields exactly one response.
pub trait DiscoveryHandler {
    fn on_register(&mut self, role: Role, registrant: Registrant, topics: &[String]) -> Response;

    fn on_is_ready(&self) -> Response;

    fn on_lookup_publishers_by_topic(&self, topics: &[String]) -> Response;

    fn on_list_all_publishers(&self) -> Response;
}

#[derive(Debug)]
pub struct Dispatcher {
    mode: DisseminationMode,
    registry: TopicRegistry,
    counters: Counters,
    broker: BrokerSlot,
}

impl Dispatcher {
    pub fn new(
        mode: DisseminationMode,
        expected_publishers: usize,
        expected_subscribers: usize,
    ) -> Self {
        Self {
            mode,
            registry: TopicRegistry::new(),
            counters: Counters::new(expected_publishers, expected_subscribers),
            broker: BrokerSlot::new(),
        }
    }

    pub fn mode(&self) -> DisseminationMode {
        self.mode
    }

    pub fn registry(&self) -> &TopicRegistry {
        &self.registry
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn broker(&self) -> &BrokerSlot {
        &self.broker
    }

    pub fn readiness(&self) -> Readiness {
        evaluate(&self.counters, self.mode, &self.broker)
    }
}

impl DiscoveryHandler for Dispatcher {
    fn on_register(&mut self, role: Role, registrant: Registrant, topics: &[String]) -> Response {
        match role {
            Role::Publisher => {
                self.registry.register_publisher(&registrant, topics);
                self.counters.registered_publishers =
                    self.counters.registered_publishers.saturating_add(1);
                info!(
                    "publisher {registrant} registered for {} topic(s) ({}/{})",
                    topics.len(),
                    self.counters.registered_publishers,
                    self.counters.expected_publishers
                );
            }
            Role::Subscriber => {
                self.registry.register_subscriber(&registrant, topics);
                self.counters.registered_subscribers =
                    self.counters.registered_subscribers.saturating_add(1);
                info!(
                    "subscriber {registrant} registered for {} topic(s) ({}/{})",
                    topics.len(),
                    self.counters.registered_subscribers,
                    self.counters.expected_subscribers
                );
            }
            Role::Both => {
                if self.broker.is_set() {
                    debug!("replacing previously registered broker");
                }
                self.broker.set(registrant.addr.clone(), registrant.port);
                info!("broker registered at {}:{}", registrant.addr, registrant.port);
            }
        }

        Response::Register {
            status: Status::Success,
        }
    }

    fn on_is_ready(&self) -> Response {
        let readiness = self.readiness();
        let status = if readiness.is_ready() {
            Status::Success
        } else {
            Status::Failure
        };

        match readiness.reason {
            ReasonCode::Ok => info!("is_ready: success; {}", readiness.reason.describe()),
            _ => info!("is_ready: failure; {}", readiness.reason.describe()),
        }

        Response::IsReady {
            status,
            reason: readiness.reason,
        }
    }

    fn on_lookup_publishers_by_topic(&self, topics: &[String]) -> Response {
        let publishers = match self.mode {
            DisseminationMode::Direct => self.registry.publishers_for_topics(topics),
            DisseminationMode::Broker => self.broker.as_registrant().into_iter().collect(),
        };
        info!(
            "lookup for {:?} returned {} publisher(s)",
            topics,
            publishers.len()
        );

        Response::LookupPublishersByTopic { publishers }
    }

    fn on_list_all_publishers(&self) -> Response {
        let publishers = self.registry.all_publishers();
        info!("listing {} known publisher(s)", publishers.len());

        Response::AllPublishers { publishers }
    }
}
