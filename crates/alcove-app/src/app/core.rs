//! AlcoveApp struct definition and constructor.

use std::sync::Arc;

use winit::window::Window;

use alcove_config::AlcoveConfig;
use alcove_views::webview::{ViewEventSink, WryFactory};
use alcove_views::ViewManager;

use crate::shell::{ShellIpcSink, ShellView};

/// Top-level application state.
pub struct AlcoveApp {
    pub(super) config: AlcoveConfig,

    // Windowing — created on `resumed`
    pub(super) window: Option<Arc<Window>>,
    pub(super) shell: Option<ShellView>,
    pub(super) shell_ipc: Option<ShellIpcSink>,

    // Service views
    pub(super) manager: Option<ViewManager<WryFactory<Arc<Window>>>>,
    pub(super) view_events: Option<ViewEventSink>,
}

impl AlcoveApp {
    pub fn new(config: AlcoveConfig) -> Self {
        Self {
            config,
            window: None,
            shell: None,
            shell_ipc: None,
            manager: None,
            view_events: None,
        }
    }

    /// Tear down every view ahead of process exit.
    pub(super) fn shutdown(&mut self) {
        if let Some(manager) = self.manager.as_mut() {
            manager.shutdown();
        }
    }
}
