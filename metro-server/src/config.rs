//! Configuration for routing and the server.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default penalty added per line change (2 minutes).
pub const DEFAULT_TRANSFER_PENALTY_SECS: f64 = 120.0;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The bind address could not be parsed
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBind { value: String, message: String },
}

/// Parameters for annotating routes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    /// Seconds added to the total time for each transfer.
    pub transfer_penalty_secs: f64,
}

impl RouteConfig {
    pub fn new(transfer_penalty_secs: f64) -> Self {
        Self {
            transfer_penalty_secs,
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_secs: DEFAULT_TRANSFER_PENALTY_SECS,
        }
    }
}

/// Server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Stop record file (semicolon-separated).
    pub stops_path: PathBuf,

    /// Edge record file (semicolon-separated).
    pub edges_path: PathBuf,

    /// Directory of static front-end assets.
    pub static_dir: PathBuf,

    pub route: RouteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stops_path: PathBuf::from("data/Sommet.csv"),
            edges_path: PathBuf::from("data/Aretes.csv"),
            static_dir: PathBuf::from("static"),
            route: RouteConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment, falling back to defaults.
    ///
    /// Recognised variables: `METRO_BIND`, `METRO_STOPS`, `METRO_EDGES`,
    /// `METRO_STATIC`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("METRO_BIND") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidBind {
                    value: value.clone(),
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(value) = lookup("METRO_STOPS") {
            config.stops_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("METRO_EDGES") {
            config.edges_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("METRO_STATIC") {
            config.static_dir = PathBuf::from(value);
        }

        Ok(config)
    }
}
