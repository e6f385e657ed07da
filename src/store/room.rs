use crate::store::message::ChatMessage;

/// A named room and its ordered message history.
///
/// The history is append-only; insertion order is the room's chronological
/// order. Rooms are created by the room-management side of the application,
/// the ingestion path only looks them up and appends.
#[derive(Debug, Default)]
pub struct Room {
    pub room_id: String,
    pub messages: Vec<ChatMessage>,
}

impl Room {
    /// Creates an empty room with the given identifier.
    pub fn new(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            messages: Vec::new(),
        }
    }

    /// Appends a message at the end of the history.
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
