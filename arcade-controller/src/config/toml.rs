//! TOML configuration parser
//!
//! Deserializes [`ArcadeConfig`] with serde and then validates it, so a
//! returned config is always safe to hand to [`spawn`](crate::spawn).

use arcade_core::config::{ArcadeConfig, ValidationError};
use thiserror::Error;

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Not valid TOML, or a key of the wrong type or unknown name
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] ::toml::de::Error),
    /// Well formed but inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(ValidationError),
}

/// Parse and validate a configuration document
pub fn parse_config(input: &str) -> Result<ArcadeConfig, ConfigError> {
    let config: ArcadeConfig = ::toml::from_str(input)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}
