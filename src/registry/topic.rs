//! Topic management
//!
//! A `Topic` holds the publishers serving a topic name and the subscribers
//! interested in it. Both lists keep insertion order and accept duplicates:
//! a registrant registered twice for the same topic is listed twice.
//!
//! Concurrency note: callers must synchronize access to `Topic` (for example
//! via the dispatcher lock) when registering.

use crate::registry::registrant::Registrant;

#[derive(Debug, Default)]
pub struct Topic {
    pub name: String,
    pub publishers: Vec<Registrant>,
    pub subscribers: Vec<Registrant>,
}

impl Topic {
    /// Create a new topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            publishers: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Append a publisher to the topic.
    pub fn add_publisher(&mut self, registrant: Registrant) {
        self.publishers.push(registrant);
    }

    /// Append a subscriber to the topic.
    pub fn add_subscriber(&mut self, registrant: Registrant) {
        self.subscribers.push(registrant);
    }
}
