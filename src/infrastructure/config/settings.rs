//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all gateway settings.
//! Configuration is loaded from a TOML file; the backend credential is taken
//! from the environment variable the file names, never from the file itself.
//!
//! # Example
//!
//! ```no_run
//! use chatgate::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::backend::BackendConfig;
use super::dispatch::DispatchConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::storage::StorageConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listener, request deadline and body limits.
    #[serde(default)]
    pub server: ServerConfig,

    /// Inference backend endpoints and credential source.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Upload directory and public URL prefix.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Backend fan-out bound.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.backend.validate()?;

        self.bind_addr()?;
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_body_bytes",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.dispatch.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dispatch.max_concurrency",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.storage.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "storage.upload_dir",
            });
        }
        let prefix = &self.storage.public_prefix;
        if prefix.starts_with('/') {
            if prefix.len() < 2 || prefix.ends_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: "storage.public_prefix",
                    reason: "path prefix must be non-root and must not end with '/'".to_string(),
                });
            }
        } else if url::Url::parse(prefix).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "storage.public_prefix",
                reason: "must be an absolute path or URL".to_string(),
            });
        }
        if self.storage.retention_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "storage.retention_secs",
                reason: "must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed listener address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> std::result::Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind",
                reason: e.to_string(),
            })
    }

    /// Whole-request deadline.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// Stored-asset retention, if pruning is enabled.
    #[must_use]
    pub fn retention(&self) -> Option<Duration> {
        self.storage.retention_secs.map(Duration::from_secs)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
