//! The `client` module defines the representation of a connected client.
//!
//! It provides the `Client` struct, the relay's handle to one live WebSocket
//! connection: a unique identifier plus the buffered channel used to push
//! broadcasts out to that connection.

pub mod subscriber;
pub use subscriber::Client;

#[cfg(test)]
mod tests;
