//! The `readiness` module decides whether dissemination may begin.
//!
//! It provides the dissemination mode, the registration counters, the
//! broker slot and the stateless `evaluate` function that combines them.

pub mod broker_slot;
pub mod evaluator;

pub use broker_slot::BrokerSlot;
pub use evaluator::{Counters, DisseminationMode, Readiness, ReadinessState, ReasonCode, evaluate};
