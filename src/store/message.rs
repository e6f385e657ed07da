use serde::{Deserialize, Serialize};

/// A single chat message, as appended to a room's history and broadcast to
/// that room's subscribers.
///
/// The relay serializes one `ChatMessage` per send: the JSON delivered to
/// subscribers is exactly the JSON form of the value that was appended.
///
/// # Fields
///
/// - `sender` - Display name of the client that submitted the message.
/// - `content` - The message body, copied verbatim from the request.
/// - `timestamp` - Server-assigned Unix timestamp in milliseconds, set at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub content: String,
    pub timestamp: i64,
}
