//! Config validation.

use alcove_common::ConfigError;

use crate::schema::AlcoveConfig;

/// Largest accepted activation grace period. Anything longer makes the
/// app feel broken rather than debounced.
const MAX_ACTIVATION_DELAY_MS: u64 = 10_000;

pub fn validate(config: &AlcoveConfig) -> Result<(), ConfigError> {
    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "window size must be positive (got {}x{})",
            config.window.width, config.window.height
        )));
    }
    if config.views.activation_delay_ms > MAX_ACTIVATION_DELAY_MS {
        return Err(ConfigError::ValidationError(format!(
            "views.activation_delay_ms must be <= {MAX_ACTIVATION_DELAY_MS}"
        )));
    }
    if config.todos.enabled && config.todos.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "todos.url must not be empty when todos is enabled".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AlcoveConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&AlcoveConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = AlcoveConfig::default();
        config.window.width = 0.0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("window size"));
    }

    #[test]
    fn rejects_absurd_activation_delay() {
        let mut config = AlcoveConfig::default();
        config.views.activation_delay_ms = 60_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_empty_todos_url_when_enabled() {
        let mut config = AlcoveConfig::default();
        config.todos.url.clear();
        assert!(validate(&config).is_err());

        config.todos.enabled = false;
        assert!(validate(&config).is_ok());
    }
}
