use serde::Deserialize;

use crate::readiness::DisseminationMode;

/// Top-level configuration settings for the application.
///
/// Includes settings for the server endpoint, discovery and dissemination.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub discovery: DiscoverySettings,
    pub dissemination: DisseminationSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Discovery strategy and the number of participants to wait for.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub strategy: String,
    pub publishers: usize,
    pub subscribers: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DisseminationSettings {
    pub strategy: DisseminationMode,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
/// Section and key aliases accept the capitalised `[Discovery] Strategy = ...` layout.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    #[serde(alias = "Server")]
    pub server: Option<PartialServerSettings>,
    #[serde(alias = "Discovery")]
    pub discovery: Option<PartialDiscoverySettings>,
    #[serde(alias = "Dissemination")]
    pub dissemination: Option<PartialDisseminationSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    #[serde(alias = "Host")]
    pub host: Option<String>,
    #[serde(alias = "Port")]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialDiscoverySettings {
    #[serde(alias = "Strategy")]
    pub strategy: Option<String>,
    #[serde(alias = "Publishers")]
    pub publishers: Option<usize>,
    #[serde(alias = "Subscribers")]
    pub subscribers: Option<usize>,
}

/// Dissemination strategy is kept as a string here and parsed by the loader
/// so a typo surfaces as a readable error.
#[derive(Debug, Deserialize)]
pub struct PartialDisseminationSettings {
    #[serde(alias = "Strategy")]
    pub strategy: Option<String>,
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub publishers: Option<usize>,
    pub subscribers: Option<usize>,
}

impl Settings {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(publishers) = overrides.publishers {
            self.discovery.publishers = publishers;
        }
        if let Some(subscribers) = overrides.subscribers {
            self.discovery.subscribers = subscribers;
        }
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 5555,
            },
            discovery: DiscoverySettings {
                strategy: "Centralized".to_string(),
                publishers: 1,
                subscribers: 1,
            },
            dissemination: DisseminationSettings {
                strategy: DisseminationMode::Direct,
            },
        }
    }
}
