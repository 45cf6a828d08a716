//! Command dispatch against the registry.

use std::time::Instant;

use alcove_common::{ServiceId, ViewCommand};
use tracing::{debug, info, warn};

use crate::handle::ViewHandle;
use crate::manager::ViewManager;
use crate::registry::ViewRegistry;
use crate::surface::{Surface, SurfaceFactory};

/// How a single-target command picks its handle.
///
/// Resolved once per command; an unresolved target turns the command into
/// a silent no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandTarget {
    Explicit(ServiceId),
    Active,
    Todos,
}

impl CommandTarget {
    /// The uniform fallback rule: explicit id when supplied, otherwise
    /// whichever view is currently active.
    pub fn explicit_or_active(id: Option<ServiceId>) -> Self {
        match id {
            Some(id) => Self::Explicit(id),
            None => Self::Active,
        }
    }

    pub fn resolve_mut<'r, S: Surface>(
        &self,
        registry: &'r mut ViewRegistry<S>,
    ) -> Option<&'r mut ViewHandle<S>> {
        match self {
            Self::Explicit(id) => registry.lookup_mut(id),
            Self::Active => registry.lookup_active_mut(),
            Self::Todos => registry.lookup_todos_mut(),
        }
    }
}

impl<F: SurfaceFactory> ViewManager<F> {
    /// Execute one advisory command. Commands never queue, never retry,
    /// and never report errors back; failed surface ops are logged.
    pub fn dispatch(&mut self, cmd: ViewCommand, now: Instant) {
        match cmd {
            ViewCommand::OpenDevTools { service_id } => {
                let target = CommandTarget::explicit_or_active(service_id);
                if let Some(handle) = target.resolve_mut(&mut self.registry) {
                    debug!(service = %handle.id(), "toggling dev tools");
                    handle.toggle_devtools();
                }
            }
            ViewCommand::OpenTodosDevTools => {
                if let Some(handle) = CommandTarget::Todos.resolve_mut(&mut self.registry) {
                    handle.toggle_devtools();
                }
            }
            ViewCommand::ReloadService { service_id } => {
                let target = CommandTarget::explicit_or_active(service_id);
                if let Some(handle) = target.resolve_mut(&mut self.registry) {
                    debug!(service = %handle.id(), "reloading view");
                    if let Err(e) = handle.reload() {
                        warn!(service = %handle.id(), error = %e, "reload failed");
                    }
                }
            }
            ViewCommand::ReloadTodos => {
                if let Some(handle) = CommandTarget::Todos.resolve_mut(&mut self.registry) {
                    if let Err(e) = handle.reload() {
                        warn!(error = %e, "todos reload failed");
                    }
                }
            }
            ViewCommand::NavigateService { service_id, url } => {
                let target = CommandTarget::Explicit(service_id);
                if let Some(handle) = target.resolve_mut(&mut self.registry) {
                    debug!(service = %handle.id(), url = %url, "navigating view");
                    if let Err(e) = handle.navigate(&url) {
                        warn!(service = %handle.id(), error = %e, "navigation failed");
                    }
                }
            }
            ViewCommand::ResizeServices { bounds } => {
                debug!(?bounds, "resizing service views");
                self.service_bounds = bounds;
                for handle in self.registry.iter_mut().filter(|h| !h.is_todos()) {
                    if let Err(e) = handle.resize(bounds) {
                        warn!(service = %handle.id(), error = %e, "resize failed");
                    }
                }
            }
            ViewCommand::ResizeTodos { bounds } => {
                debug!(?bounds, "resizing todos view");
                self.todos_bounds = bounds;
                if let Some(handle) = CommandTarget::Todos.resolve_mut(&mut self.registry) {
                    if let Err(e) = handle.resize(bounds) {
                        warn!(error = %e, "todos resize failed");
                    }
                }
            }
            ViewCommand::HideAll => self.hide_all(),
            ViewCommand::ShowAll => self.show_all(now),
            ViewCommand::UserLoginStatus { logged_in } => {
                info!(logged_in, "user login status changed");
                if !logged_in {
                    self.activation.cancel();
                    self.registry.clear_services();
                }
            }
        }
    }
}
