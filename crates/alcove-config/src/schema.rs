//! Configuration schema types for Alcove.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults below.

use serde::{Deserialize, Serialize};

/// Host window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels.
    pub width: f64,
    /// Logical height in pixels.
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Alcove".into(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Service view behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Grace period before an activated view steals focus, in
    /// milliseconds.
    pub activation_delay_ms: u64,
    /// Custom user agent applied to every service view.
    pub user_agent: Option<String>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            activation_delay_ms: 5,
            user_agent: None,
        }
    }
}

/// Reserved todos view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodosConfig {
    pub enabled: bool,
    pub url: String,
    pub partition: String,
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://todos.alcove.app".into(),
            partition: "persist:todos".into(),
        }
    }
}

/// The shell UI webview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// URL of the shell UI. When unset, a built-in placeholder page is
    /// loaded.
    pub url: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { url: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlcoveConfig {
    pub window: WindowConfig,
    pub views: ViewsConfig,
    pub todos: TodosConfig,
    pub shell: ShellConfig,
}
