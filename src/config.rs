//! Application configuration.
//!
//! Settings come from an optional configuration file overlaid by
//! `TASKBOARD_`-prefixed environment variables, so `TASKBOARD_DATABASE_URL`
//! overrides `database_url` from the file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Default configuration file stem, resolved relative to the working
/// directory with any supported extension.
pub const DEFAULT_CONFIG_FILE: &str = "config/app";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    /// Maximum number of pooled database connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Enables debug-level logging when `RUST_LOG` is unset.
    #[serde(default)]
    pub debug: bool,
}

impl AppConfig {
    /// Loads configuration from [`DEFAULT_CONFIG_FILE`] (if present) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a required
    /// setting is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Loads configuration from the given file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing or unparsable, or a
    /// required setting is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

fn default_listen_address() -> String {
    "0.0.0.0:8080".to_owned()
}

const fn default_max_connections() -> u32 {
    5
}
