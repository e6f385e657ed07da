use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use sled::Db;
use tracing::debug;

use crate::store::message::ChatMessage;
use crate::store::room::Room;
use crate::utils::error::RelayError;

/// Tree holding one key per known room id.
const ROOMS_TREE: &str = "rooms";

/// Name prefix for the per-room message trees, so a room named "rooms"
/// cannot collide with the room index itself.
const MESSAGES_TREE_PREFIX: &str = "messages/";

/// The shared room store.
///
/// Rooms live in memory behind one lock per room: concurrent appends to the
/// same room serialize against each other, while appends to unrelated rooms
/// proceed independently. Every append is written through to sled before it
/// becomes visible in the in-memory history.
pub struct RoomStore {
    rooms: RwLock<HashMap<String, Arc<Mutex<Room>>>>,
    db: Db,
}

impl RoomStore {
    /// Opens the store at `path`, loading any rooms and histories persisted
    /// by a previous run.
    pub fn open(path: &str) -> Result<Self, RelayError> {
        let db = sled::open(path)?;
        let mut rooms = HashMap::new();

        let rooms_tree = db.open_tree(ROOMS_TREE)?;
        for entry in rooms_tree.iter() {
            let (key, _) = entry?;
            let room_id = String::from_utf8_lossy(&key).to_string();
            let mut room = Room::new(&room_id);

            let messages = db.open_tree(format!("{MESSAGES_TREE_PREFIX}{room_id}"))?;
            for entry in messages.iter() {
                let (_, value) = entry?;
                if let Ok(message) = serde_json::from_slice::<ChatMessage>(&value) {
                    room.append(message);
                }
            }

            debug!("loaded room {room_id} with {} messages", room.len());
            rooms.insert(room_id, Arc::new(Mutex::new(room)));
        }

        Ok(Self {
            rooms: RwLock::new(rooms),
            db,
        })
    }

    /// Creates a room if it does not already exist. Creating an existing
    /// room is a no-op, so callers can seed rooms unconditionally at startup.
    pub fn create_room(&self, room_id: &str) -> Result<(), RelayError> {
        let mut rooms = self.rooms.write().unwrap();
        if rooms.contains_key(room_id) {
            return Ok(());
        }

        self.db
            .open_tree(ROOMS_TREE)?
            .insert(room_id, Vec::<u8>::new())?;
        rooms.insert(room_id.to_string(), Arc::new(Mutex::new(Room::new(room_id))));
        Ok(())
    }

    /// Looks up a room by exact identifier.
    pub fn find_room(&self, room_id: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().unwrap().get(room_id).cloned()
    }

    /// Appends `message` to the room's history, writing it through to sled
    /// first.
    ///
    /// Fails with [`RelayError::RoomNotFound`] if the identifier does not
    /// resolve to an existing room; the history is left untouched in that
    /// case.
    pub fn append_message(&self, room_id: &str, message: ChatMessage) -> Result<(), RelayError> {
        let room = self
            .find_room(room_id)
            .ok_or_else(|| RelayError::RoomNotFound {
                room_id: room_id.to_string(),
            })?;

        // Holding the room lock across the sled write and the in-memory push
        // keeps the persisted order identical to the visible order.
        let mut room = room.lock().unwrap();
        let serialized = serde_json::to_vec(&message)?;
        let key = self.db.generate_id()?.to_be_bytes();
        self.db
            .open_tree(format!("{MESSAGES_TREE_PREFIX}{}", room.room_id))?
            .insert(key, serialized)?;
        room.append(message);
        Ok(())
    }

    /// Number of messages currently in the room's history, if the room exists.
    pub fn message_count(&self, room_id: &str) -> Option<usize> {
        self.find_room(room_id)
            .map(|room| room.lock().unwrap().len())
    }

    /// Identifiers of all known rooms, in no particular order.
    pub fn room_ids(&self) -> Vec<String> {
        self.rooms.read().unwrap().keys().cloned().collect()
    }
}

impl std::fmt::Debug for RoomStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomStore")
            .field("rooms", &self.rooms.read().unwrap().len())
            .field("db", &"sled::Db")
            .finish()
    }
}
