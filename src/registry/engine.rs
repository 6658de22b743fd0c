//! Registry engine
//!
//! This module contains the in-memory topic registry responsible for:
//! - recording which publishers serve and which subscribers want each topic
//! - answering publisher lookups for a list of topics
//! - keeping the deduplicated set of every publisher ever registered
//!
//! Concurrency and usage notes:
//! - The API here is synchronous and designed to be owned by the
//!   `Dispatcher`, which the transport holds behind a lock
//!   (`Arc<Mutex<Dispatcher>>`). A registration is applied to every topic
//!   before the lock is released, so readers never see half of it.
//! - Entries are append-only; there is no deregistration.

use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::debug;

use crate::registry::registrant::Registrant;
use crate::registry::topic::Topic;

#[derive(Debug, Default)]
pub struct TopicRegistry {
    pub topics: HashMap<String, Topic>,
    pub publishers: IndexSet<Registrant>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            publishers: IndexSet::new(),
        }
    }

    /// Records `registrant` as a publisher of every topic in `topics`.
    ///
    /// The per-topic lists keep duplicates; the publisher set does not.
    pub fn register_publisher(&mut self, registrant: &Registrant, topics: &[String]) {
        for name in topics {
            self.topic_mut(name).add_publisher(registrant.clone());
            debug!("{registrant} publishes {name}");
        }
        if !self.publishers.contains(registrant) {
            self.publishers.insert(registrant.clone());
        }
    }

    pub fn register_subscriber(&mut self, registrant: &Registrant, topics: &[String]) {
        for name in topics {
            self.topic_mut(name).add_subscriber(registrant.clone());
            debug!("{registrant} subscribes to {name}");
        }
    }

    /// Publishers of the requested topics, in request order then
    /// registration order. A publisher serving two requested topics is
    /// listed twice; unknown topics contribute nothing.
    pub fn publishers_for_topics(&self, topics: &[String]) -> Vec<Registrant> {
        topics
            .iter()
            .filter_map(|name| self.topics.get(name))
            .flat_map(|topic| topic.publishers.iter().cloned())
            .collect()
    }

    /// Every distinct publisher, in first-registration order.
    pub fn all_publishers(&self) -> Vec<Registrant> {
        self.publishers.iter().cloned().collect()
    }

    fn topic_mut(&mut self, name: &str) -> &mut Topic {
        self.topics
            .entry(name.to_string())
            .or_insert_with(|| Topic::new(name))
    }
}
