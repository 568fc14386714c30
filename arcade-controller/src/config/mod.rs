//! Configuration loading
//!
//! The controller is configured from a TOML document. Every key is
//! optional; missing keys take the stock cabinet values.

pub mod toml;

pub use self::toml::{parse_config, ConfigError};
