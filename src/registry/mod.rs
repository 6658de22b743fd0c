//! The `registry` module holds who registered for what: publishers and
//! subscribers indexed by topic, and the set of every known publisher.

pub mod engine;
pub mod registrant;
pub mod topic;

pub use engine::TopicRegistry;
pub use registrant::{BROKER_ID, Registrant, Role};
