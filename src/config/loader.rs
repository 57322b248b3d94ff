use super::types::Config;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate the configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.contextes.is_empty() {
        return Err(ConfigError::Validation(
            "no backup contexts defined".to_string(),
        ));
    }

    for (name, context) in &config.contextes {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "context names must be non-empty".to_string(),
            ));
        }
        if context.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "context '{}': prefix must be non-empty",
                name
            )));
        }
    }

    Ok(())
}
