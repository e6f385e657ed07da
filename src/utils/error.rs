use thiserror::Error;

/// Errors surfaced by the ingestion path.
///
/// A failed ingestion is terminal for that single request: the transport
/// reports it to the sender and nothing is retried. No message is broadcast
/// unless its append to the store completed first.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The target room id does not exist in the store.
    #[error("room not found: {room_id}")]
    RoomNotFound { room_id: String },

    /// The backing sled database failed.
    #[error("room store unavailable: {0}")]
    Store(#[from] sled::Error),

    /// A message could not be encoded for storage.
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}
