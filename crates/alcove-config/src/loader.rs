//! TOML config loading.

use std::path::{Path, PathBuf};

use alcove_common::ConfigError;
use tracing::debug;

use crate::schema::AlcoveConfig;

/// Default config location: `<config_dir>/alcove/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("alcove").join("config.toml"))
}

/// Load a config from an explicit path. Errors if the file is missing or
/// fails to parse.
pub fn load_from(path: &Path) -> Result<AlcoveConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let config: AlcoveConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load from the default location. A missing file is a normal first run
/// and yields defaults.
pub fn load_default() -> Result<AlcoveConfig, ConfigError> {
    match default_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => {
            debug!("no config file, using defaults");
            Ok(AlcoveConfig::default())
        }
    }
}
