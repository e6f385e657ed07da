//! The `ingest` module is the write path of the relay.
//!
//! It accepts an inbound send request, stamps it with the server clock,
//! appends the resulting message to the room's history, and only then hands
//! the same message to the relay for fan-out.

pub mod handler;

pub use handler::{IngestHandler, SendRequest};
