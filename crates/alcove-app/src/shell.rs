//! The shell webview: the UI that drives the view manager.
//!
//! The shell fills the host window; service views render on top of it in
//! the region the shell leaves for them. It talks to Rust over the IPC
//! bridge from [`crate::ipc`].

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use winit::window::Window;
use wry::{WebView, WebViewBuilder};

use alcove_common::Bounds;
use alcove_config::schema::ShellConfig;
use alcove_views::webview::bounds_to_wry;

use crate::ipc::{js_dispatch_message, SHELL_INIT_SCRIPT};

/// Raw IPC bodies posted by the shell, drained by the event loop.
pub type ShellIpcSink = Arc<Mutex<Vec<String>>>;

/// Placeholder page loaded when no shell URL is configured.
const SHELL_PLACEHOLDER_HTML: &str = r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Alcove</title></head>
  <body style="background:#1b1d23;color:#d7d9df;font-family:sans-serif">
    <p style="margin:2rem">No shell configured. Set <code>shell.url</code> in config.toml.</p>
  </body>
</html>
"#;

pub struct ShellView {
    webview: WebView,
    ipc: ShellIpcSink,
}

impl ShellView {
    /// Build the shell webview as a full-window child.
    pub fn build(
        window: &Arc<Window>,
        config: &ShellConfig,
        size: Bounds,
    ) -> Result<Self, wry::Error> {
        let ipc: ShellIpcSink = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ipc);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds_to_wry(size))
            .with_initialization_script(SHELL_INIT_SCRIPT)
            .with_ipc_handler(move |request| {
                let body = request.body().to_string();
                if let Ok(mut bodies) = sink.lock() {
                    bodies.push(body);
                }
            });

        match &config.url {
            Some(url) => {
                debug!(url = %url, "loading shell");
                builder = builder.with_url(url.as_str());
            }
            None => {
                debug!("no shell url configured, loading placeholder");
                builder = builder.with_html(SHELL_PLACEHOLDER_HTML);
            }
        }

        let webview = builder.build_as_child(window.as_ref())?;
        Ok(Self { webview, ipc })
    }

    /// Clone of the IPC sink for the event loop to drain.
    pub fn ipc_sink(&self) -> ShellIpcSink {
        Arc::clone(&self.ipc)
    }

    /// Keep the shell sized to the window.
    pub fn resize(&self, size: Bounds) {
        if let Err(e) = self.webview.set_bounds(bounds_to_wry(size)) {
            warn!(error = %e, "shell resize failed");
        }
    }

    /// Send a message to the shell's registered handler for `kind`.
    pub fn send(&self, kind: &str, payload: &serde_json::Value) {
        let script = js_dispatch_message(kind, payload);
        if let Err(e) = self.webview.evaluate_script(&script) {
            warn!(kind, error = %e, "shell IPC send failed");
        }
    }
}
