//! Application configuration
//!
//! Read from a TOML file (`~/.config/crustacea/config.toml` unless
//! `CRUSTACEA_CONFIG` points elsewhere). Every key is optional; a missing
//! file yields the defaults. `PORT` and `DATABASE_URL` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CRUSTACEA_CONFIG";

mod defaults {
    pub fn host() -> String {
        "0.0.0.0".to_string()
    }
    pub fn port() -> u16 {
        3000
    }
    pub fn shutdown_timeout() -> u64 {
        30
    }
    pub fn database_path() -> String {
        "data/crustaceans.db".to_string()
    }
    pub fn max_connections() -> u32 {
        5
    }
    pub fn log_level() -> String {
        "info".to_string()
    }
    pub fn log_format() -> String {
        "text".to_string()
    }
    pub fn seed_enabled() -> bool {
        true
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    #[serde(default = "defaults::host")]
    pub host: String,
    #[serde(default = "defaults::port")]
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "defaults::shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            shutdown_timeout: defaults::shutdown_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseSection {
    /// SQLite file, used when `url` is absent
    #[serde(default = "defaults::database_path")]
    pub path: String,
    /// Full connection URL; wins over `path`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "defaults::max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: defaults::database_path(),
            url: None,
            max_connections: defaults::max_connections(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => DatabaseConfig::sqlite(&self.path).url,
        }
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        DatabaseConfig {
            url: section.connection_url(),
            max_connections: section.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "defaults::log_format")]
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            format: defaults::log_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedSection {
    /// Insert sample species into an empty table on start-up
    #[serde(default = "defaults::seed_enabled")]
    pub enabled: bool,
}

impl Default for SeedSection {
    fn default() -> Self {
        Self {
            enabled: defaults::seed_enabled(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub seed: SeedSection,
}

impl AppConfig {
    /// Loads `path`, falling back to defaults when the file does not exist,
    /// then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `PORT` and `DATABASE_URL` using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                message: format!("'{}' is not a valid port", port),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections",
                message: "must be at least 1".into(),
            });
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue {
                key: "logging.format",
                message: format!("expected 'text' or 'json', got '{}'", self.logging.format),
            });
        }
        Ok(())
    }

    /// `host:port` the API listens on
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `$CRUSTACEA_CONFIG`, or `<config dir>/crustacea/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crustacea")
        .join("config.toml")
}
