//! Embedded service views for the Alcove shell.
//!
//! One window hosts one webview per configured service. This crate owns
//! their whole lifecycle:
//! - Reconciliation of a desired descriptor list against live views
//! - Single-active-view activation with a deferred focus grace period
//! - Advisory one-shot commands (reload, navigate, resize, dev tools)
//! - Window focus / shell navigation coordination
//!
//! The browsing context is abstracted behind [`surface::Surface`]; the
//! production implementation in [`webview`] wraps `wry` child webviews.

pub mod activation;
pub mod dispatch;
pub mod events;
pub mod handle;
pub mod manager;
pub mod registry;
pub mod surface;
pub mod webview;

mod reconcile;

#[cfg(test)]
pub(crate) mod testkit;

pub use activation::{ActivationQueue, DEFAULT_ACTIVATION_DELAY};
pub use dispatch::CommandTarget;
pub use events::{PageLoadState, ViewEvent};
pub use handle::{ViewConfig, ViewHandle};
pub use manager::{ViewManager, SETTINGS_ROUTE, TODOS_SERVICE_ID};
pub use registry::ViewRegistry;
pub use surface::{Surface, SurfaceFactory, SurfaceSpec};
pub use webview::{WryFactory, WrySurface};
