mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{RelaySettings, ServerSettings, Settings};


/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server and relay configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            log_level: partial
                .server
                .as_ref()
                .and_then(|s| s.log_level.clone())
                .unwrap_or(default.server.log_level),
        },
        relay: RelaySettings {
            max_connections: partial
                .relay
                .as_ref()
                .and_then(|r| r.max_connections)
                .unwrap_or(default.relay.max_connections),
            data_dir: partial
                .relay
                .as_ref()
                .and_then(|r| r.data_dir.clone())
                .unwrap_or(default.relay.data_dir),
            rooms: partial
                .relay
                .as_ref()
                .and_then(|r| r.rooms.clone())
                .unwrap_or(default.relay.rooms),
        },
    })
}
