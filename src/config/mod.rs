//! Configuration management for the embeddings service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod loader;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name reported in logs
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Directory holding `model.onnx` and `tokenizer.json`
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console log format: "pretty", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory the rotating `embeddingsapi.log` files are written to
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

// Default value functions
fn default_model_name() -> String {
    "MiniLM-32dim-model".to_string()
}
fn default_model_dir() -> PathBuf {
    PathBuf::from("models/MiniLM-32dim-model")
}
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}
fn default_server_port() -> u16 {
    8000
}
fn default_max_body_size() -> usize {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            dir: default_model_dir(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_size_mb: default_max_body_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        loader::load_config(path)
    }

    /// Load configuration with environment variable overrides
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        loader::load_config_with_env(path)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        loader::validate_config(self)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self {
            model: ModelConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_body_size_mb, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_value(serde_json::json!({ "server": { "port": 9000 } })).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.model.name, "MiniLM-32dim-model");
    }
}
