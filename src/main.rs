use std::sync::{Arc, Mutex};

use roomcast::config::load_config;
use roomcast::ingest::IngestHandler;
use roomcast::relay::Relay;
use roomcast::store::RoomStore;
use roomcast::transport::websocket::start_websocket_server;
use roomcast::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = load_config().expect("Failed to load configuration");
    logging::init(&config.server.log_level);

    let store = match RoomStore::open(&config.relay.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open room store at {}: {e}", config.relay.data_dir);
            return;
        }
    };

    for room_id in &config.relay.rooms {
        if let Err(e) = store.create_room(room_id) {
            error!("Failed to create room {room_id}: {e}");
            return;
        }
    }
    info!("Serving rooms: {:?}", store.room_ids());

    let relay = Arc::new(Mutex::new(Relay::new()));
    let ingest = Arc::new(IngestHandler::new(store, relay.clone()));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    tokio::select! {
        _ = start_websocket_server(&addr, relay, ingest, config.clone()) => {
            error!("WebSocket server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }
}
