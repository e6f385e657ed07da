//! WebSocket transport.
//!
//! A minimal WebSocket server that translates protocol JSON messages into
//! relay and ingestion operations. Responsibilities:
//! - Accept TCP/WebSocket connections, up to the configured connection limit
//! - Create a `Client` for each connection and register it with the `Relay`
//! - Track the room a connection has joined and move its subscription on
//!   join/leave
//! - Forward send requests into the ingestion path and report failures back
//!   to the sender

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tracing::{error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::client::Client;
use crate::config::Settings;
use crate::ingest::IngestHandler;
use crate::relay::Relay;
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::RelayError;

pub async fn start_websocket_server(
    addr: &str,
    relay: Arc<Mutex<Relay>>,
    ingest: Arc<IngestHandler>,
    settings: Settings,
) {
    let listener = TcpListener::bind(addr).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        {
            let relay = relay.lock().unwrap();
            if relay.clients.len() >= settings.relay.max_connections {
                warn!("connection limit reached, rejecting new connection");
                continue;
            }
        }

        let relay = relay.clone();
        let ingest = ingest.clone();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("WebSocket handshake error: {e}");
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();
            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let client = Client::new(tx);
            let client_id = client.id.clone();
            {
                let mut relay = relay.lock().unwrap();
                relay.register_client(client);
            }

            let cleanup_called = Arc::new(AtomicBool::new(false));

            let do_cleanup = {
                let relay = relay.clone();
                let client_id = client_id.clone();
                let cleanup_called = cleanup_called.clone();

                move || {
                    if !cleanup_called.swap(true, Ordering::SeqCst) {
                        let mut relay = relay.lock().unwrap();
                        relay.cleanup_client(&client_id);
                    }
                }
            };

            // Forward broadcasts from the relay out to the socket.
            {
                let client_id = client_id.clone();
                let do_cleanup = do_cleanup.clone();

                spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        if let Err(e) = ws_sender.send(msg).await {
                            warn!("failed to send message to {client_id}: {e}");
                            break;
                        }
                    }

                    do_cleanup();
                });
            }

            // The room this connection is currently subscribed to.
            let mut joined: Option<String> = None;

            while let Some(Ok(msg)) = ws_receiver.next().await {
                if msg.is_text() {
                    let text = msg.to_text().unwrap();
                    handle_text(&relay, &ingest, &client_id, &mut joined, text);
                }
            }

            info!("{client_id} disconnected");
            do_cleanup();
        });
    }
}

/// Dispatches one JSON text frame from `client_id`.
pub(crate) fn handle_text(
    relay: &Arc<Mutex<Relay>>,
    ingest: &Arc<IngestHandler>,
    client_id: &str,
    joined: &mut Option<String>,
    text: &str,
) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Join { room_id }) => {
            let mut relay = relay.lock().unwrap();
            if let Some(previous) = joined.take() {
                relay.unsubscribe(&previous, &client_id.to_string());
            }
            relay.subscribe(&room_id, client_id.to_string());
            info!("{client_id} joined {room_id}");
            *joined = Some(room_id);
        }
        Ok(ClientMessage::Leave { room_id }) => {
            let mut relay = relay.lock().unwrap();
            relay.unsubscribe(&room_id, &client_id.to_string());
            if joined.as_deref() == Some(room_id.as_str()) {
                *joined = None;
            }
            info!("{client_id} left {room_id}");
        }
        Ok(ClientMessage::Send { room_id, message }) => {
            match ingest.ingest(&room_id, message) {
                Ok(_) => info!("{client_id} sent to {room_id}"),
                Err(e) => {
                    warn!("ingest from {client_id} failed: {e}");
                    report_error(relay, client_id, &e);
                }
            }
        }
        Err(err) => {
            warn!("invalid client message from {client_id}: {err} | {text}");
        }
    }
}

/// Reports an ingestion failure back to the sender only.
fn report_error(relay: &Arc<Mutex<Relay>>, client_id: &str, error: &RelayError) {
    let relay = relay.lock().unwrap();
    if let Some(client) = relay.clients.get(client_id) {
        let response = ServerMessage::Error {
            message: error.to_string(),
        };
        if let Ok(json) = serde_json::to_string(&response) {
            let _ = client.sender.send(WsMessage::text(json));
        }
    }
}
