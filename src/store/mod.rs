//! The `store` module owns room state: each room's identity and its ordered,
//! append-only message history.
//!
//! Lookups and appends go through [`RoomStore`], which keeps rooms in memory
//! for serving and writes every appended message through to an embedded
//! `sled` database, so histories survive a restart.

pub mod message;
pub mod room;
pub mod room_store;

pub use message::ChatMessage;
pub use room::Room;
pub use room_store::RoomStore;
