use serde::{Deserialize, Serialize};

use crate::ingest::SendRequest;

/// Messages a client may send to the server.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join a room's broadcast channel. A connection listens to one room at
    /// a time; joining another room leaves the previous one.
    #[serde(rename = "join")]
    Join { room_id: String },

    /// Leave a room's broadcast channel.
    #[serde(rename = "leave")]
    Leave { room_id: String },

    /// Post a message to a room. `room_id` is the channel the send is
    /// addressed to; the payload carries its own room id, and the two are
    /// expected to match.
    #[serde(rename = "send")]
    Send {
        room_id: String,
        message: SendRequest,
    },
}

/// Messages the server sends to a single client. Broadcasts themselves are
/// delivered as bare `ChatMessage` JSON, not wrapped in this enum.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "error")]
    Error { message: String },
}
