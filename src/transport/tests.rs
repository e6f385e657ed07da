use std::sync::{Arc, Mutex};

use crate::client::Client;
use crate::ingest::IngestHandler;
use crate::relay::Relay;
use crate::store::RoomStore;
use crate::transport::message::ServerMessage;
use crate::transport::websocket::handle_text;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

struct Fixture {
    _dir: TempDir,
    store: Arc<RoomStore>,
    relay: Arc<Mutex<Relay>>,
    ingest: Arc<IngestHandler>,
}

fn setup() -> Fixture {
    let dir = tempdir().unwrap();
    let store = Arc::new(RoomStore::open(dir.path().to_str().unwrap()).unwrap());
    let relay = Arc::new(Mutex::new(Relay::new()));
    let ingest = Arc::new(IngestHandler::new(store.clone(), relay.clone()));
    Fixture {
        _dir: dir,
        store,
        relay,
        ingest,
    }
}

/// Registers a connected client and returns its id plus the receiving end
/// of its outbound channel.
fn connect(relay: &Arc<Mutex<Relay>>) -> (String, mpsc::UnboundedReceiver<WsMessage>) {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    let client_id = client.id.clone();
    relay.lock().unwrap().register_client(client);
    (client_id, rx)
}

#[test]
fn test_handle_join() {
    let f = setup();
    let (client_id, _rx) = connect(&f.relay);
    let mut joined = None;

    let msg = json!({ "type": "join", "room_id": "general" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    assert_eq!(joined.as_deref(), Some("general"));
    let relay = f.relay.lock().unwrap();
    let channel = relay.channels.get("general").unwrap();
    assert!(channel.subscribers.contains(&client_id));
}

#[test]
fn test_join_switches_rooms() {
    let f = setup();
    let (client_id, _rx) = connect(&f.relay);
    let mut joined = None;

    let msg = json!({ "type": "join", "room_id": "general" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);
    let msg = json!({ "type": "join", "room_id": "random" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    assert_eq!(joined.as_deref(), Some("random"));
    let relay = f.relay.lock().unwrap();
    assert!(
        !relay
            .channels
            .get("general")
            .unwrap()
            .subscribers
            .contains(&client_id)
    );
    assert!(
        relay
            .channels
            .get("random")
            .unwrap()
            .subscribers
            .contains(&client_id)
    );
}

#[test]
fn test_handle_leave() {
    let f = setup();
    let (client_id, _rx) = connect(&f.relay);
    let mut joined = None;

    let msg = json!({ "type": "join", "room_id": "general" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);
    let msg = json!({ "type": "leave", "room_id": "general" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    assert!(joined.is_none());
    let relay = f.relay.lock().unwrap();
    let channel = relay.channels.get("general").unwrap();
    assert!(!channel.subscribers.contains(&client_id));
}

#[test]
fn test_handle_send_appends_and_broadcasts() {
    let f = setup();
    f.store.create_room("general").unwrap();
    let (client_id, mut rx) = connect(&f.relay);
    let mut joined = None;

    let msg = json!({ "type": "join", "room_id": "general" }).to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    let msg = json!({
        "type": "send",
        "room_id": "general",
        "message": { "room_id": "general", "sender": "alice", "content": "hi" }
    })
    .to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    assert_eq!(f.store.message_count("general"), Some(1));

    let received = rx.try_recv().unwrap();
    if let WsMessage::Text(text) = received {
        let parsed: crate::store::ChatMessage = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(parsed.sender, "alice");
        assert_eq!(parsed.content, "hi");
    } else {
        panic!("Expected a text message");
    }
}

#[test]
fn test_handle_send_to_missing_room_reports_error() {
    let f = setup();
    let (client_id, mut rx) = connect(&f.relay);
    let mut joined = None;

    let msg = json!({
        "type": "send",
        "room_id": "ghost",
        "message": { "room_id": "ghost", "sender": "bob", "content": "x" }
    })
    .to_string();
    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, &msg);

    let received = rx.try_recv().unwrap();
    if let WsMessage::Text(text) = received {
        let parsed: ServerMessage = serde_json::from_str(text.as_str()).unwrap();
        let ServerMessage::Error { message } = parsed;
        assert!(message.contains("ghost"));
    } else {
        panic!("Expected a text message");
    }
}

#[test]
fn test_invalid_message_is_ignored() {
    let f = setup();
    let (client_id, mut rx) = connect(&f.relay);
    let mut joined = None;

    handle_text(&f.relay, &f.ingest, &client_id, &mut joined, "not json");
    handle_text(
        &f.relay,
        &f.ingest,
        &client_id,
        &mut joined,
        r#"{"type":"dance"}"#,
    );

    assert!(joined.is_none());
    assert!(rx.try_recv().is_err());
}
