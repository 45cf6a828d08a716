//! `ApplicationHandler` implementation for the winit event loop.

use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use alcove_common::Bounds;
use alcove_views::ViewEvent;

use super::core::AlcoveApp;

impl ApplicationHandler for AlcoveApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Focused(true) => {
                if let Some(manager) = self.manager.as_mut() {
                    manager.window_focused();
                }
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let (Some(window), Some(shell)) = (&self.window, &self.shell) {
                        let logical = size.to_logical::<f64>(window.scale_factor());
                        shell.resize(Bounds::new(0.0, 0.0, logical.width, logical.height));
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump();

        // Sleep until the pending activation is due, or until the next
        // window/webview event.
        match self
            .manager
            .as_ref()
            .and_then(|m| m.next_activation_deadline())
        {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

impl AlcoveApp {
    /// Drain shell IPC, fire due activations, and forward view events.
    fn pump(&mut self) {
        let now = Instant::now();

        let bodies = match &self.shell_ipc {
            Some(sink) => {
                let mut guard = sink.lock().unwrap();
                std::mem::take(&mut *guard)
            }
            None => Vec::new(),
        };
        for body in bodies {
            self.handle_ipc_message(&body, now);
        }

        if let Some(manager) = self.manager.as_mut() {
            manager.poll_activation(now);
        }

        let events = match &self.view_events {
            Some(sink) => {
                let mut guard = sink.lock().unwrap();
                std::mem::take(&mut *guard)
            }
            None => Vec::new(),
        };
        for event in events {
            match event {
                ViewEvent::TitleChanged { service, title } => {
                    if let Some(shell) = &self.shell {
                        shell.send(
                            "service-title-changed",
                            &serde_json::json!({
                                "serviceId": service.as_str(),
                                "title": title,
                            }),
                        );
                    }
                }
                ViewEvent::PageLoad {
                    service,
                    state,
                    url,
                } => {
                    tracing::debug!(service = %service, ?state, url = %url, "service page load");
                }
                ViewEvent::NavigationRequested { service, url } => {
                    tracing::debug!(service = %service, url = %url, "service navigation");
                }
            }
        }
    }
}
