//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::storage::{FileBackend, StorageResult, Store, DEFAULT_STORAGE_KEY};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the store blob lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Key the blob is stored under
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("request-pro").to_string_lossy().to_string())
        .unwrap_or_else(|| "./request_pro_data".to_string())
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

impl StorageConfig {
    /// Load the file-backed store this config points at
    pub fn open_store(&self) -> StorageResult<Store> {
        Store::load(FileBackend::new(&self.data_dir), self.key.clone())
    }

    /// Path of the blob file
    pub fn blob_path(&self) -> PathBuf {
        FileBackend::new(&self.data_dir).path_for(&self.key)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for this crate at the configured level
    pub fn filter_directive(&self) -> String {
        format!("request_pro={}", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("request-pro").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = lookup("REQUEST_PRO_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Some(key) = lookup("REQUEST_PRO_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(level) = lookup("REQUEST_PRO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REQUEST_PRO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Request Pro Configuration
#
# Environment variables override these settings:
# - REQUEST_PRO_DATA_DIR
# - REQUEST_PRO_STORAGE_KEY
# - REQUEST_PRO_LOG_LEVEL
# - REQUEST_PRO_LOG_FORMAT

[storage]
# Directory holding the store file (default: platform data dir)
# data_dir = "/var/lib/request-pro"

# Key the store is saved under (file name without .json)
key = "request_pro_v10"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
