//! Window creation, shell webview, and view manager setup.

use std::sync::Arc;
use std::time::Duration;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use alcove_common::Bounds;
use alcove_views::webview::WryFactory;
use alcove_views::ViewManager;

use crate::shell::ShellView;

use super::core::AlcoveApp;

impl AlcoveApp {
    /// Create the window, the shell webview, and the view manager.
    /// Returns `false` if initialization failed and the event loop should
    /// exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let shell_bounds = Bounds::new(
            0.0,
            0.0,
            self.config.window.width,
            self.config.window.height,
        );
        let shell = match ShellView::build(&window, &self.config.shell, shell_bounds) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to create shell webview: {e}");
                return false;
            }
        };
        self.shell_ipc = Some(shell.ipc_sink());

        let data_root = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("alcove")
            .join("partitions");
        let factory = WryFactory::new(Arc::clone(&window), data_root)
            .with_user_agent(self.config.views.user_agent.clone());
        self.view_events = Some(factory.event_sink());

        let mut manager = ViewManager::with_activation_delay(
            factory,
            Duration::from_millis(self.config.views.activation_delay_ms),
        );

        if self.config.todos.enabled {
            if let Err(e) = manager.ensure_todos(&self.config.todos.url, &self.config.todos.partition)
            {
                tracing::warn!(error = %e, "todos view creation failed");
            }
        }

        self.window = Some(window);
        self.shell = Some(shell);
        self.manager = Some(manager);
        tracing::info!("window initialized");
        true
    }
}
