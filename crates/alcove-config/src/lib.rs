//! Application configuration: TOML schema, loader, validation.

pub mod loader;
pub mod schema;
pub mod validation;

use std::path::Path;

use alcove_common::ConfigError;

pub use schema::AlcoveConfig;

/// Load and validate the config from the default location, or from
/// `override_path` when given.
pub fn load_config(override_path: Option<&Path>) -> Result<AlcoveConfig, ConfigError> {
    let config = match override_path {
        Some(path) => loader::load_from(path)?,
        None => loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}
