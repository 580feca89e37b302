// Configuration module for the nickname server
//
// Settings come from a TOML file, then from NICKREG__<SECTION>__<KEY>
// environment variables. Every key has a default, so a partial file is valid.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// HTTP API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Registry storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// IP address to bind the API server to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number for the API server
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Registry engine, "sqlite" or "memory"
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Path to the database file (sqlite engine only)
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8118
}

fn default_engine() -> String {
    "sqlite".to_string()
}

fn default_database_path() -> String {
    "data/nicks.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            database_path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Address the API server listens on, as `host:port`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.api.bind_address, self.api.port)
    }

    /// Render the configuration as a TOML document
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Path to the configuration file
///
/// # Returns
///
/// * `Ok(ServerConfig)` if the configuration was loaded successfully
/// * `Err(ConfigError)` if the file is missing or a value has the wrong type
pub fn load_config(config_path: &Path) -> Result<ServerConfig, ConfigError> {
    Config::builder()
        .add_source(File::from(config_path))
        .add_source(
            Environment::with_prefix("NICKREG")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_address(), "127.0.0.1:8118");
        assert_eq!(config.storage.engine, "sqlite");
        assert_eq!(config.storage.database_path, "data/nicks.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_dir, path) = write_config(
            r#"
            [api]
            port = 9000

            [storage]
            engine = "memory"
            "#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.bind_address, "127.0.0.1");
        assert_eq!(config.storage.engine, "memory");
        assert_eq!(config.storage.database_path, "data/nicks.db");
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let rendered = ServerConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[storage]"));

        let (_dir, path) = write_config(&rendered);
        assert_eq!(load_config(&path).unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_wrong_type() {
        let (_dir, path) = write_config("[api]\nport = \"not a port\"\n");
        assert!(load_config(&path).is_err());
    }
}
