//! The `relay` module is the live side of the system: per-room broadcast
//! channels and the fan-out of published messages to their subscribers.
//!
//! Nothing in here touches persistence. Channels track currently-connected
//! listeners only, so a subscriber that joins after a message was published
//! never receives it retroactively.

pub mod channel;
pub mod engine;

pub use engine::Relay;
