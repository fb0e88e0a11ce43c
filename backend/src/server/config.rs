//! Server settings and the configuration object built from them.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use storefront::domain::DEFAULT_USER_META_TIMEOUT;
use storefront::outbound::mongo::{StoreConfig, StoreHandles};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_NAME: &str = "storefront";

/// Settings loaded from CLI flags, `STOREFRONT_*` environment variables, and
/// the configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// MongoDB connection string. When unset the server runs on an empty
    /// in-memory user store.
    pub mongodb_uri: Option<String>,
    /// Database holding the `users` and `products` collections.
    pub database_name: Option<String>,
    /// Deadline for one user metadata lookup, in seconds.
    #[ortho_config(default = 5)]
    pub user_meta_timeout_secs: u64,
}

/// Reasons the settings cannot be turned into a [`ServerConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("user metadata timeout must be at least one second")]
    ZeroTimeout,
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database name, falling back to `storefront`.
    pub fn database_name(&self) -> &str {
        self.database_name
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_NAME)
    }

    /// Configured lookup deadline; zero is rejected.
    pub fn user_meta_timeout(&self) -> Result<Duration, SettingsError> {
        match self.user_meta_timeout_secs {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Store connection parameters, when a MongoDB URI is configured.
    pub fn store_config(&self) -> Option<StoreConfig> {
        self.mongodb_uri
            .as_deref()
            .filter(|uri| !uri.trim().is_empty())
            .map(|uri| StoreConfig::new(uri, self.database_name()))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) user_meta_timeout: Duration,
    pub(crate) store: Option<StoreHandles>,
}

impl ServerConfig {
    /// Configuration with the default lookup deadline and no store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            user_meta_timeout: DEFAULT_USER_META_TIMEOUT,
            store: None,
        }
    }

    /// Validate `settings` into a configuration. The store is attached
    /// separately once connected.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?).with_user_meta_timeout(settings.user_meta_timeout()?))
    }

    /// Override the per-lookup deadline.
    #[must_use]
    pub fn with_user_meta_timeout(mut self, timeout: Duration) -> Self {
        self.user_meta_timeout = timeout;
        self
    }

    /// Attach open store handles for the MongoDB-backed adapters.
    #[must_use]
    pub fn with_store(mut self, store: StoreHandles) -> Self {
        self.store = Some(store);
        self
    }
}
