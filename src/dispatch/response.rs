//! Response definitions for the dispatcher
//!
//! Every request produces exactly one `Response`. Logical failures (not
//! ready yet, nothing registered for a topic) are ordinary responses, never
//! errors.

use serde::{Deserialize, Serialize};

use crate::readiness::ReasonCode;
use crate::registry::Registrant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Register {
        status: Status,
    },
    IsReady {
        status: Status,
        reason: ReasonCode,
    },
    LookupPublishersByTopic {
        publishers: Vec<Registrant>,
    },
    AllPublishers {
        publishers: Vec<Registrant>,
    },
}

impl Response {
    pub fn is_success(&self) -> bool {
        match self {
            Response::Register { status } | Response::IsReady { status, .. } => {
                *status == Status::Success
            }
            Response::LookupPublishersByTopic { .. } | Response::AllPublishers { .. } => true,
        }
    }
}
