use std::collections::HashSet;

pub type SubscriberId = String;

/// The live side of a room: the set of connections currently listening for
/// broadcasts on that room's channel.
///
/// Membership is ephemeral. It is entered on an explicit join and left on
/// disconnect or an explicit leave; nothing here is persisted.
#[derive(Debug, Default)]
pub struct RoomChannel {
    pub room_id: String,
    pub subscribers: HashSet<SubscriberId>,
}

impl RoomChannel {
    /// Creates a channel for the given room with no subscribers.
    pub fn new(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            subscribers: HashSet::new(),
        }
    }

    /// Adds a subscriber. Joining twice has no effect.
    pub fn subscribe(&mut self, id: SubscriberId) {
        self.subscribers.insert(id);
    }

    /// Removes a subscriber. Leaving a channel it never joined has no effect.
    pub fn unsubscribe(&mut self, id: &SubscriberId) {
        self.subscribers.remove(id);
    }
}
