//! Configuration loader with environment variable support

use super::Config;
use crate::error::{ApiError, Result};
use config::{Environment, File};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load configuration from a TOML file with environment variable overrides
pub fn load_config_with_env<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(
            Environment::with_prefix("EMBEDDINGS_API")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.model.name.is_empty() {
        return Err(ApiError::Config("Model name is required".to_string()));
    }

    if config.model.dir.as_os_str().is_empty() {
        return Err(ApiError::Config("Model directory is required".to_string()));
    }

    if config.server.max_body_size_mb == 0 {
        return Err(ApiError::Config(
            "Max body size must be greater than 0".to_string(),
        ));
    }

    match config.logging.format.as_str() {
        "pretty" | "compact" | "json" => {}
        other => {
            return Err(ApiError::Config(format!(
                "Unknown log format '{}' (expected pretty, compact or json)",
                other
            )));
        }
    }

    Ok(())
}
