//! Configuration loading and layering.
//!
//! Precedence: built-in defaults (lowest) -> config file -> FDBSCAN_*
//! environment overlay (highest). Command-line flags are applied on top by
//! the CLI layer after loading.

use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_endpoint() -> String {
    "http://localhost:4000/instances".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_database() -> String {
    "FDB".to_string()
}

fn default_collection() -> String {
    "fileInformation".to_string()
}

/// Directory service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Full URL of the instance-listing endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

/// Per-node document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdbConfig {
    /// Port every node's document store listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bound on connection establishment and server selection for one
    /// visit, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Database holding the record collection.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection scanned during a visit.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for FdbConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_ms: default_timeout_ms(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// Root configuration for the tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub directory: DirectoryConfig,
    pub fdb: FdbConfig,
    pub logging: LoggingConfig,
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config file location (~/.config/fdbscan/config.toml).
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "fdbscan", "fdbscan")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default file location and environment.
    ///
    /// A missing default file is not an error; the defaults and the
    /// environment overlay still apply.
    pub fn load() -> Result<FleetConfig, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }
        Self::finish(builder)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<FleetConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()));
        Self::finish(builder)
    }

    /// Apply the FDBSCAN_* environment overlay and deserialize.
    /// Uses FDBSCAN_ prefix and __ as separator for nested keys.
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<FleetConfig, ConfigError> {
        let builder = builder.add_source(
            Environment::with_prefix("FDBSCAN")
                .separator("__")
                .try_parsing(true),
        );
        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = FleetConfig::default();
        assert_eq!(config.directory.endpoint, "http://localhost:4000/instances");
        assert_eq!(config.fdb.port, 80);
        assert_eq!(config.fdb.timeout_ms, 2000);
        assert_eq!(config.fdb.database, "FDB");
        assert_eq!(config.fdb.collection, "fileInformation");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[directory]").unwrap();
        writeln!(file, "endpoint = \"http://directory.internal:4000/instances\"").unwrap();
        writeln!(file, "[fdb]").unwrap();
        writeln!(file, "port = 27017").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(
            config.directory.endpoint,
            "http://directory.internal:4000/instances"
        );
        assert_eq!(config.fdb.port, 27017);
        // Untouched keys keep their defaults.
        assert_eq!(config.fdb.database, "FDB");
        assert_eq!(config.fdb.collection, "fileInformation");
    }

    #[test]
    fn test_environment_overlay_wins_over_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[fdb]").unwrap();
        writeln!(file, "timeout_ms = 9000").unwrap();

        std::env::set_var("FDBSCAN_FDB__TIMEOUT_MS", "750");
        let config = ConfigLoader::load_from_file(&path).unwrap();
        std::env::remove_var("FDBSCAN_FDB__TIMEOUT_MS");

        assert_eq!(config.fdb.timeout_ms, 750);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.toml");
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_default_config_path_points_into_fdbscan_dir() {
        if let Some(path) = ConfigLoader::default_config_path() {
            assert!(path.ends_with("fdbscan/config.toml"));
        }
    }
}
