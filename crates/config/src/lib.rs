//! Configuration for gantry tooling.
//!
//! Configuration is a TOML file with a `[bridge]` section describing the
//! genesis parameters of a bridge deployment and an optional `[logging]`
//! section.

mod config;
mod errors;

use std::{fs, path::Path};

pub use config::{BridgeParams, Config, GenesisParams, LoggingConfig, ValidatorEntry};
pub use errors::ConfigError;

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}
