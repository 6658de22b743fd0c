use crate::dispatch::{Dispatcher, Status};
use crate::readiness::{DisseminationMode, ReasonCode};
use crate::registry::Registrant;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::transport::router::handle_text;
use serde_json::json;
use std::sync::Mutex;

fn dispatcher(mode: DisseminationMode, pubs: usize, subs: usize) -> Mutex<Dispatcher> {
    Mutex::new(Dispatcher::new(mode, pubs, subs))
}

fn register(role: &str, id: &str, port: u16, topics: &[&str]) -> String {
    json!({
        "type": "register",
        "role": role,
        "info": { "id": id, "addr": "10.0.0.1", "port": port },
        "topics": topics
    })
    .to_string()
}

#[test]
fn test_handle_register() {
    let d = dispatcher(DisseminationMode::Direct, 1, 0);
    let reply = handle_text(&d, "test_client", &register("publisher", "p1", 5000, &["T1"]));

    assert_eq!(
        reply,
        ServerMessage::RegisterResp {
            status: Status::Success
        }
    );
    let d = d.lock().unwrap();
    assert_eq!(d.counters().registered_publishers, 1);
    assert_eq!(d.registry().topics["T1"].publishers.len(), 1);
}

#[test]
fn test_register_without_topics_field() {
    let d = dispatcher(DisseminationMode::Broker, 0, 0);
    let msg = json!({
        "type": "register",
        "role": "both",
        "info": { "id": "b", "addr": "10.0.0.9", "port": 6000 }
    })
    .to_string();

    let reply = handle_text(&d, "test_client", &msg);
    assert!(matches!(reply, ServerMessage::RegisterResp { .. }));
    assert!(d.lock().unwrap().broker().is_set());
}

#[test]
fn test_handle_is_ready_reports_reason() {
    let d = dispatcher(DisseminationMode::Broker, 1, 0);
    handle_text(&d, "p", &register("publisher", "p1", 5000, &["T1"]));

    let reply = handle_text(&d, "s", &json!({ "type": "is_ready" }).to_string());
    assert_eq!(
        reply,
        ServerMessage::IsReadyResp {
            status: Status::Failure,
            reason: ReasonCode::BrokerMissing,
            message: "broker not yet registered".to_string(),
        }
    );
}

#[test]
fn test_handle_lookups() {
    let d = dispatcher(DisseminationMode::Direct, 2, 0);
    handle_text(&d, "p", &register("publisher", "p1", 5000, &["T1", "T2"]));
    handle_text(&d, "p", &register("publisher", "p2", 5001, &["T2"]));

    let msg = json!({ "type": "lookup_pub_by_topic", "topics": ["T2"] }).to_string();
    match handle_text(&d, "s", &msg) {
        ServerMessage::LookupPubByTopicResp { publishers } => {
            let ids: Vec<_> = publishers.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["p1", "p2"]);
        }
        other => panic!("Expected LookupPubByTopicResp, got {other:?}"),
    }

    let msg = json!({ "type": "lookup_all_pubs" }).to_string();
    match handle_text(&d, "s", &msg) {
        ServerMessage::LookupAllPubsResp { publishers } => assert_eq!(publishers.len(), 2),
        other => panic!("Expected LookupAllPubsResp, got {other:?}"),
    }
}

#[test]
fn test_malformed_requests_get_an_error_reply() {
    let d = dispatcher(DisseminationMode::Direct, 1, 0);

    for bad in [
        "not json".to_string(),
        json!({ "type": "teleport" }).to_string(),
        register("observer", "x", 1, &["T1"]),
        json!({ "type": "register", "role": "publisher" }).to_string(),
    ] {
        let reply = handle_text(&d, "test_client", &bad);
        assert!(
            matches!(reply, ServerMessage::Error { .. }),
            "expected error reply for {bad}"
        );
    }

    // Nothing was applied and the dispatcher keeps serving.
    assert_eq!(d.lock().unwrap().counters().registered_publishers, 0);
    let reply = handle_text(&d, "test_client", &register("publisher", "p1", 5000, &["T1"]));
    assert!(matches!(reply, ServerMessage::RegisterResp { .. }));
}

#[test]
fn test_client_message_wire_format() {
    let msg = ClientMessage::Register {
        role: crate::registry::Role::Subscriber,
        info: Registrant::new("s1", "10.0.0.2", 7000),
        topics: vec!["T1".to_string()],
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["type"], "register");
    assert_eq!(value["role"], "subscriber");
    assert_eq!(value["info"]["port"], 7000);

    let value = serde_json::to_value(ClientMessage::IsReady).unwrap();
    assert_eq!(value, json!({ "type": "is_ready" }));
}

#[test]
fn test_server_message_wire_format() {
    let reply = ServerMessage::IsReadyResp {
        status: Status::Success,
        reason: ReasonCode::Ok,
        message: ReasonCode::Ok.describe().to_string(),
    };
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value["type"], "is_ready_resp");
    assert_eq!(value["status"], "success");
    assert_eq!(value["reason"], "ok");
}
