use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

/// A connected WebSocket client.
///
/// Each client is identified by a generated connection id and owns the
/// sending half of an unbounded channel; the transport layer drains the
/// receiving half into the actual socket. Pushing a broadcast onto the
/// channel therefore never blocks the publisher.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for the connection.
    pub id: String,

    /// Channel used to hand WebSocket messages to this client's send loop.
    pub sender: UnboundedSender<WsMessage>,
}

impl Client {
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: format!("conn-{}", Uuid::new_v4()),
            sender,
        }
    }
}
