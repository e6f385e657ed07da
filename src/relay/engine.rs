use std::collections::HashMap;

use tracing::{debug, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::client::Client;
use crate::relay::channel::{RoomChannel, SubscriberId};
use crate::store::ChatMessage;

/// The relay fans published messages out to room subscribers.
///
/// It keeps one channel per room id and a registry of connected clients, and
/// delivers each published message to every current subscriber of the target
/// room. Rooms are fully isolated from each other: a publish to one room is
/// invisible to subscribers of every other room.
///
/// The relay is synchronous and meant to be shared as `Arc<Mutex<Relay>>` by
/// the transport layer. Delivery itself goes through each client's buffered
/// sender, so a publish never waits on a slow receiver; callers should still
/// avoid holding the relay lock across network I/O.
#[derive(Debug, Default)]
pub struct Relay {
    pub channels: HashMap<String, RoomChannel>,
    pub clients: HashMap<SubscriberId, Client>,
}

impl Relay {
    /// Creates a relay with no channels and no clients.
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
            clients: HashMap::new(),
        }
    }

    /// Registers a newly connected client so publishes can reach it.
    pub fn register_client(&mut self, client: Client) {
        self.clients.insert(client.id.clone(), client);
    }

    /// Drops a client from the registry.
    pub fn remove_client(&mut self, client_id: &SubscriberId) {
        self.clients.remove(client_id);
    }

    /// Subscribes a client to a room's channel, creating the channel on
    /// first use. Channels track live listeners only, so this is independent
    /// of whether the room exists in the store.
    pub fn subscribe(&mut self, room_id: &str, subscriber: SubscriberId) {
        let channel = self
            .channels
            .entry(room_id.to_string())
            .or_insert_with(|| RoomChannel::new(room_id));
        channel.subscribe(subscriber);
    }

    /// Unsubscribes a client from a room's channel. Unknown rooms are ignored.
    pub fn unsubscribe(&mut self, room_id: &str, subscriber: &SubscriberId) {
        if let Some(channel) = self.channels.get_mut(room_id) {
            channel.unsubscribe(subscriber);
        }
    }

    /// Delivers `message` to every current subscriber of `room_id`.
    ///
    /// Delivery is fire-and-forget per subscriber: a failed send (for
    /// example a client whose connection dropped mid-publish) is logged and
    /// skipped, and never fails the publish for the remaining subscribers.
    /// Subscribers that join after this call do not receive `message`.
    pub fn publish(&self, room_id: &str, message: &ChatMessage) {
        let Some(channel) = self.channels.get(room_id) else {
            debug!("no live subscribers for room {room_id}");
            return;
        };

        let text = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize message for room {room_id}: {e}");
                return;
            }
        };
        let ws_msg = WsMessage::text(text);

        for sub_id in &channel.subscribers {
            if let Some(client) = self.clients.get(sub_id) {
                if let Err(e) = client.sender.send(ws_msg.clone()) {
                    warn!("failed to send to {sub_id}: {e}");
                }
            } else {
                warn!("no client registered with id {sub_id}");
            }
        }
    }

    /// Removes a client and every subscription it held. Used when a
    /// connection closes.
    pub fn cleanup_client(&mut self, client_id: &SubscriberId) {
        self.remove_client(client_id);

        for channel in self.channels.values_mut() {
            channel.unsubscribe(client_id);
        }

        debug!("cleaned up client {client_id}");
    }
}
