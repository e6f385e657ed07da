use super::subscriber::Client;
use tokio::sync::mpsc;
use tungstenite::protocol::Message as WsMessage;

#[test]
fn test_client_new() {
    let (tx, _) = mpsc::unbounded_channel::<WsMessage>();
    let client = Client::new(tx);
    assert!(client.id.starts_with("conn-"));
}

#[test]
fn test_client_ids_are_unique() {
    let (tx_a, _) = mpsc::unbounded_channel::<WsMessage>();
    let (tx_b, _) = mpsc::unbounded_channel::<WsMessage>();
    assert_ne!(Client::new(tx_a).id, Client::new(tx_b).id);
}
