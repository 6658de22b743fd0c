use serde::{Deserialize, Serialize};

use crate::dispatch::{Response, Status};
use crate::readiness::ReasonCode;
use crate::registry::{Registrant, Role};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "register")]
    Register {
        role: Role,
        info: Registrant,
        #[serde(default)]
        topics: Vec<String>,
    },
    #[serde(rename = "is_ready")]
    IsReady,
    #[serde(rename = "lookup_pub_by_topic")]
    LookupPubByTopic {
        #[serde(default)]
        topics: Vec<String>,
    },
    #[serde(rename = "lookup_all_pubs")]
    LookupAllPubs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "register_resp")]
    RegisterResp { status: Status },
    #[serde(rename = "is_ready_resp")]
    IsReadyResp {
        status: Status,
        reason: ReasonCode,
        message: String,
    },
    #[serde(rename = "lookup_pub_by_topic_resp")]
    LookupPubByTopicResp { publishers: Vec<Registrant> },
    #[serde(rename = "lookup_all_pubs_resp")]
    LookupAllPubsResp { publishers: Vec<Registrant> },
    #[serde(rename = "error")]
    Error { message: String },
}

impl From<Response> for ServerMessage {
    fn from(response: Response) -> Self {
        match response {
            Response::Register { status } => ServerMessage::RegisterResp { status },
            Response::IsReady { status, reason } => ServerMessage::IsReadyResp {
                status,
                reason,
                message: reason.describe().to_string(),
            },
            Response::LookupPublishersByTopic { publishers } => {
                ServerMessage::LookupPubByTopicResp { publishers }
            }
            Response::AllPublishers { publishers } => {
                ServerMessage::LookupAllPubsResp { publishers }
            }
        }
    }
}
