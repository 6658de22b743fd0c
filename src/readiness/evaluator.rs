//! Readiness evaluation
//!
//! The system is ready once every expected publisher and subscriber has
//! registered and, when dissemination goes through a broker, the broker has
//! registered too. Nothing is cached: `evaluate` recomputes from the current
//! counters and broker slot on every call.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::readiness::broker_slot::BrokerSlot;
use crate::utils::error::DiscoveryError;

/// How data flows once the system is ready. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisseminationMode {
    /// Publishers send straight to subscribers.
    #[default]
    Direct,
    /// Everything goes through a single broker.
    Broker,
}

impl FromStr for DisseminationMode {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "broker" => Ok(Self::Broker),
            _ => Err(DiscoveryError::UnknownDissemination(s.to_string())),
        }
    }
}

impl std::fmt::Display for DisseminationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "Direct"),
            Self::Broker => write!(f, "Broker"),
        }
    }
}

/// Expected participant counts and the registrations seen so far.
///
/// Registrations are counted per request, not per topic. Counts beyond the
/// expected values are accepted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub expected_publishers: usize,
    pub expected_subscribers: usize,
    pub registered_publishers: usize,
    pub registered_subscribers: usize,
}

impl Counters {
    pub fn new(expected_publishers: usize, expected_subscribers: usize) -> Self {
        Self {
            expected_publishers,
            expected_subscribers,
            ..Self::default()
        }
    }

    /// Totals are compared in `u128` so configured counts near `usize::MAX`
    /// cannot overflow.
    pub fn counts_met(&self) -> bool {
        let registered = self.registered_publishers as u128 + self.registered_subscribers as u128;
        let expected = self.expected_publishers as u128 + self.expected_subscribers as u128;
        registered == expected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    NotReady,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Ok,
    CountsNotMet,
    BrokerMissing,
}

impl ReasonCode {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Ok => "dissemination can now begin",
            Self::CountsNotMet => "not all publishers and subscribers have registered",
            Self::BrokerMissing => "broker not yet registered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub state: ReadinessState,
    pub reason: ReasonCode,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.state == ReadinessState::Ready
    }
}

pub fn evaluate(counters: &Counters, mode: DisseminationMode, broker: &BrokerSlot) -> Readiness {
    let reason = if !counters.counts_met() {
        ReasonCode::CountsNotMet
    } else if mode == DisseminationMode::Broker && !broker.is_set() {
        ReasonCode::BrokerMissing
    } else {
        ReasonCode::Ok
    };

    let state = match reason {
        ReasonCode::Ok => ReadinessState::Ready,
        _ => ReadinessState::NotReady,
    };

    Readiness { state, reason }
}
