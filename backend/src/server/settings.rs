//! Process settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `USERS_*` environment variables. Loading only
//! checks types; [`ServerSettings::bind_addr`] and friends apply the
//! remaining rules so `main` can fail fast with a named setting.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Invalid or missing configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Parsing the configuration sources failed.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// `USERS_PORT` was not provided.
    #[error("USERS_PORT must be set")]
    MissingPort,
    /// `USERS_PORT` was zero.
    #[error("USERS_PORT must be between 1 and 65535")]
    InvalidPort,
    /// `USERS_HOST` was not an IP address.
    #[error("USERS_HOST must be an IP address, got {0:?}")]
    InvalidHost(String),
    /// `USERS_DB_MAX_CONNECTIONS` was zero.
    #[error("USERS_DB_MAX_CONNECTIONS must be at least 1")]
    InvalidPoolSize,
}

/// Settings for the HTTP server and its database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServerSettings {
    /// Listening port. Required.
    pub port: Option<u16>,
    /// Listening address; defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// PostgreSQL URL. Without one the server keeps users in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Load settings from the environment and the given arguments.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a value has the wrong type, for
    /// example a non-numeric or out-of-range `USERS_PORT`.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| ConfigError::Load(err.to_string()))
    }

    /// Socket address to bind, combining `host` and `port`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the missing or invalid setting.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let port = match self.port {
            None => return Err(ConfigError::MissingPort),
            Some(0) => return Err(ConfigError::InvalidPort),
            Some(port) => port,
        };
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(host.to_owned()))?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, rejecting zero.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPoolSize`] for zero.
    pub fn db_max_connections(&self) -> Result<u32, ConfigError> {
        match self.db_max_connections {
            0 => Err(ConfigError::InvalidPoolSize),
            size => Ok(size),
        }
    }
}
