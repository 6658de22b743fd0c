use crate::client::DiscoveryClient;
use crate::dispatch::{Dispatcher, Status};
use crate::readiness::{DisseminationMode, ReasonCode};
use crate::registry::{BROKER_ID, Registrant, Role};
use crate::transport::message::ServerMessage;
use crate::transport::websocket::start_websocket_server;
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn setup_server(
    mode: DisseminationMode,
    pubs: usize,
    subs: usize,
) -> (String, Arc<Mutex<Dispatcher>>) {
    let port = portpicker::pick_unused_port().expect("No free ports");
    let addr = format!("127.0.0.1:{port}");
    let dispatcher = Arc::new(Mutex::new(Dispatcher::new(mode, pubs, subs)));

    tokio::spawn(start_websocket_server(addr.clone(), dispatcher.clone()));

    // Give the server a moment to start up
    tokio::time::sleep(Duration::from_millis(100)).await;

    (format!("ws://{addr}"), dispatcher)
}

fn topics(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_direct_end_to_end() {
    let (url, dispatcher) = setup_server(DisseminationMode::Direct, 2, 1).await;

    let mut pub1 = DiscoveryClient::connect(&url).await.expect("connect pub1");
    let mut pub2 = DiscoveryClient::connect(&url).await.expect("connect pub2");
    let mut sub = DiscoveryClient::connect(&url).await.expect("connect sub");

    let p1 = Registrant::new("p1", "10.0.0.1", 5000);
    let p2 = Registrant::new("p2", "10.0.0.2", 5001);

    let status = pub1
        .register(Role::Publisher, p1.clone(), &topics(&["T1"]))
        .await
        .unwrap();
    assert_eq!(status, Status::Success);
    pub2.register(Role::Publisher, p2.clone(), &topics(&["T1", "T2"]))
        .await
        .unwrap();

    let readiness = sub.is_ready().await.unwrap();
    assert!(!readiness.is_ready());
    assert_eq!(readiness.reason, ReasonCode::CountsNotMet);

    sub.register(
        Role::Subscriber,
        Registrant::new("s1", "10.0.1.1", 7000),
        &topics(&["T1"]),
    )
    .await
    .unwrap();
    assert!(sub.is_ready().await.unwrap().is_ready());

    assert_eq!(
        sub.lookup_publishers(&topics(&["T1"])).await.unwrap(),
        vec![p1.clone(), p2.clone()]
    );
    assert!(sub.lookup_publishers(&topics(&["T9"])).await.unwrap().is_empty());
    assert_eq!(sub.all_publishers().await.unwrap(), vec![p1, p2]);

    assert_eq!(dispatcher.lock().unwrap().counters().registered_subscribers, 1);
    sub.close().await.unwrap();
}

#[tokio::test]
async fn test_broker_end_to_end() {
    let (url, _dispatcher) = setup_server(DisseminationMode::Broker, 1, 1).await;
    let mut client = DiscoveryClient::connect(&url).await.expect("connect");

    client
        .register(
            Role::Publisher,
            Registrant::new("p1", "10.0.0.1", 5000),
            &topics(&["T1"]),
        )
        .await
        .unwrap();
    client
        .register(
            Role::Subscriber,
            Registrant::new("s1", "10.0.1.1", 7000),
            &topics(&["T1"]),
        )
        .await
        .unwrap();

    assert!(client.lookup_publishers(&topics(&["T1"])).await.unwrap().is_empty());
    assert_eq!(
        client.is_ready().await.unwrap().reason,
        ReasonCode::BrokerMissing
    );

    client
        .register(Role::Both, Registrant::new("b1", "10.0.0.9", 6000), &[])
        .await
        .unwrap();

    assert!(
        client
            .wait_until_ready(Duration::from_millis(10), 3)
            .await
            .unwrap()
    );
    assert_eq!(
        client.lookup_publishers(&[]).await.unwrap(),
        vec![Registrant::new(BROKER_ID, "10.0.0.9", 6000)]
    );
}

#[tokio::test]
async fn test_wait_until_ready_gives_up() {
    let (url, _dispatcher) = setup_server(DisseminationMode::Direct, 1, 0).await;
    let mut client = DiscoveryClient::connect(&url).await.expect("connect");

    let ready = client
        .wait_until_ready(Duration::from_millis(10), 2)
        .await
        .unwrap();
    assert!(!ready);
}

#[tokio::test]
async fn test_malformed_frame_does_not_close_connection() {
    let (url, _dispatcher) = setup_server(DisseminationMode::Direct, 1, 0).await;
    let mut client = DiscoveryClient::connect(&url).await.expect("connect");

    match client.send_raw("{\"type\":\"register\"}").await.unwrap() {
        ServerMessage::Error { message } => assert!(message.starts_with("invalid request")),
        other => panic!("Expected Error, got {other:?}"),
    }

    // The same connection keeps working.
    let status = client
        .register(
            Role::Publisher,
            Registrant::new("p1", "10.0.0.1", 5000),
            &topics(&["T1"]),
        )
        .await
        .unwrap();
    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn test_out_of_range_port_is_rejected() {
    let (url, _dispatcher) = setup_server(DisseminationMode::Direct, 1, 0).await;
    let mut client = DiscoveryClient::connect(&url).await.expect("connect");

    let reply = client
        .send_raw(
            "{\"type\":\"register\",\"role\":\"publisher\",\"info\":{\"id\":\"p\",\"addr\":\"a\",\"port\":70000}}",
        )
        .await
        .unwrap();
    assert!(matches!(reply, ServerMessage::Error { .. }));

    assert!(client.all_publishers().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_are_all_applied() {
    const CLIENTS: u16 = 16;
    let (url, dispatcher) = setup_server(DisseminationMode::Direct, CLIENTS as usize, 0).await;

    let mut handles = Vec::new();
    for n in 0..CLIENTS {
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let mut client = DiscoveryClient::connect(&url).await.expect("connect");
            let me = Registrant::new(format!("p{n}"), "10.0.0.1", 5000 + n);
            client
                .register(Role::Publisher, me, &topics(&["shared", "other"]))
                .await
                .expect("register")
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Status::Success);
    }

    {
        let d = dispatcher.lock().unwrap();
        assert_eq!(d.counters().registered_publishers, CLIENTS as usize);
        assert_eq!(d.registry().topics["shared"].publishers.len(), CLIENTS as usize);
        assert_eq!(d.registry().topics["other"].publishers.len(), CLIENTS as usize);
    }

    let mut client = DiscoveryClient::connect(&url).await.expect("connect");
    assert_eq!(client.all_publishers().await.unwrap().len(), CLIENTS as usize);
    assert!(client.is_ready().await.unwrap().is_ready());
}
