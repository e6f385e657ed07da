//! The `transport` module is responsible for handling network communication
//! with clients, via WebSockets.
//!
//! It defines the JSON protocol spoken on the wire, accepts connections,
//! tracks which room each connection has joined, and forwards send requests
//! into the ingestion path.

pub mod message;
pub mod websocket;

#[cfg(test)]
mod tests;
