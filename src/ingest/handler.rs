use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::warn;

use crate::relay::Relay;
use crate::store::{ChatMessage, RoomStore};
use crate::utils::error::RelayError;

/// An inbound request to post a message to a room.
///
/// The payload names the room itself, in addition to the channel the request
/// was addressed to; callers are expected to keep the two in agreement.
#[derive(Debug, Clone, Deserialize)]
pub struct SendRequest {
    pub room_id: String,
    pub sender: String,
    pub content: String,
}

/// Handles message ingestion: look up the room, stamp the message, persist
/// it, then broadcast it.
pub struct IngestHandler {
    store: Arc<RoomStore>,
    relay: Arc<Mutex<Relay>>,
}

impl IngestHandler {
    pub fn new(store: Arc<RoomStore>, relay: Arc<Mutex<Relay>>) -> Self {
        Self { store, relay }
    }

    /// Ingests one message addressed to `channel`.
    ///
    /// The store lookup uses the room id carried in the payload, while the
    /// broadcast goes out on `channel`; a mismatch between the two is logged
    /// but not rejected. The message is appended to the room's history
    /// before the relay sees it. If the room does not exist, the request
    /// fails with [`RelayError::RoomNotFound`] and nothing is broadcast.
    pub fn ingest(&self, channel: &str, request: SendRequest) -> Result<ChatMessage, RelayError> {
        if request.room_id != channel {
            warn!(
                "send addressed to channel {channel} carries room id {}",
                request.room_id
            );
        }

        let message = ChatMessage {
            sender: request.sender,
            content: request.content,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        self.store.append_message(&request.room_id, message.clone())?;

        let relay = self.relay.lock().unwrap();
        relay.publish(channel, &message);

        Ok(message)
    }
}
