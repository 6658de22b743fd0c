mod settings;

use crate::config::settings::PartialSettings;
use crate::readiness::DisseminationMode;
use crate::utils::error::DiscoveryError;
use config::{Config, Environment, File};

pub use settings::{
    DiscoverySettings, DisseminationSettings, Overrides, ServerSettings, Settings,
};

/// Name of the only discovery strategy this service implements.
pub const CENTRALIZED: &str = "Centralized";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, discovery and dissemination configurations
pub fn load_config() -> Result<Settings, DiscoveryError> {
    load_config_from(None)
}

/// Like `load_config`, but reads `path` instead of `config/default`.
/// An explicitly named file must exist.
pub fn load_config_from(path: Option<&str>) -> Result<Settings, DiscoveryError> {
    let file = match path {
        Some(path) => File::with_name(path).required(true),
        None => File::with_name("config/default").required(false),
    };

    let builder = Config::builder().add_source(file).add_source(
        Environment::with_prefix("POPSUB")
            .separator("_")
            .try_parsing(true),
    );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let dissemination = match partial
        .dissemination
        .as_ref()
        .and_then(|d| d.strategy.as_deref())
    {
        Some(name) => name.parse::<DisseminationMode>()?,
        None => default.dissemination.strategy,
    };

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
        },
        discovery: DiscoverySettings {
            strategy: partial
                .discovery
                .as_ref()
                .and_then(|d| d.strategy.clone())
                .unwrap_or(default.discovery.strategy),
            publishers: partial
                .discovery
                .as_ref()
                .and_then(|d| d.publishers)
                .unwrap_or(default.discovery.publishers),
            subscribers: partial
                .discovery
                .as_ref()
                .and_then(|d| d.subscribers)
                .unwrap_or(default.discovery.subscribers),
        },
        dissemination: DisseminationSettings {
            strategy: dissemination,
        },
    })
}
