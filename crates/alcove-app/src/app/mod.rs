//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the shell webview, and the view manager.

mod core;
mod event_handler;
mod init;
mod ipc_dispatch;

pub use core::AlcoveApp;
