//! The view manager coordinates the registry, activation, and focus.
//!
//! One `ViewManager` instance owns every live view in a window. It is
//! driven entirely from the host's event-loop thread: reconcile passes and
//! commands run to completion, and the only deferred work is the
//! activation grace period, polled via [`ViewManager::poll_activation`].

use std::time::{Duration, Instant};

use alcove_common::{Bounds, ServiceId, SurfaceId, ViewError};
use tracing::{debug, info, warn};

use crate::activation::ActivationQueue;
use crate::handle::{ViewConfig, ViewHandle};
use crate::registry::ViewRegistry;
use crate::surface::{SurfaceFactory, SurfaceSpec};

/// Reserved id of the todos singleton view.
pub const TODOS_SERVICE_ID: &str = "todos";

/// Shell route whose overlay occupies the full window; views must not
/// render underneath it.
pub const SETTINGS_ROUTE: &str = "#/settings";

pub struct ViewManager<F: SurfaceFactory> {
    pub(crate) factory: F,
    pub(crate) registry: ViewRegistry<F::Surface>,
    pub(crate) activation: ActivationQueue,
    /// Bounds applied to newly created service views, updated by resize
    /// broadcasts.
    pub(crate) service_bounds: Bounds,
    pub(crate) todos_bounds: Bounds,
}

impl<F: SurfaceFactory> ViewManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            registry: ViewRegistry::new(),
            activation: ActivationQueue::default(),
            service_bounds: Bounds::ZERO,
            todos_bounds: Bounds::ZERO,
        }
    }

    /// Override the activation grace period (`Duration::ZERO` fires on the
    /// next poll).
    pub fn with_activation_delay(factory: F, delay: Duration) -> Self {
        let mut manager = Self::new(factory);
        manager.activation = ActivationQueue::new(delay);
        manager
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn registry(&self) -> &ViewRegistry<F::Surface> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ViewRegistry<F::Surface> {
        &mut self.registry
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Surface id of the currently active service view, if any.
    pub fn active_surface_id(&self) -> Option<SurfaceId> {
        self.registry.lookup_active().map(|h| h.surface_id())
    }

    /// Surface id of the todos view, if one was created.
    pub fn todos_surface_id(&self) -> Option<SurfaceId> {
        self.registry.lookup_todos().map(|h| h.surface_id())
    }

    // -----------------------------------------------------------------------
    // Todos singleton
    // -----------------------------------------------------------------------

    /// Create the reserved todos view if it does not exist yet.
    ///
    /// The todos view sits outside descriptor diffing: reconcile never
    /// creates or removes it, logout spares it, and it never carries the
    /// active mark. Calling this twice returns the existing surface id.
    pub fn ensure_todos(&mut self, url: &str, partition: &str) -> Result<SurfaceId, ViewError> {
        if let Some(existing) = self.registry.lookup_todos() {
            return Ok(existing.surface_id());
        }

        let spec = SurfaceSpec {
            service: ServiceId::new(TODOS_SERVICE_ID),
            url: url.to_string(),
            partition: partition.to_string(),
            bounds: self.todos_bounds,
        };
        let surface = self.factory.create(&spec)?;
        let mut handle = ViewHandle::new_todos(
            spec.service.clone(),
            surface,
            ViewConfig {
                name: "Todos".to_string(),
                url: spec.url.clone(),
                partition: spec.partition.clone(),
            },
        );
        if let Err(e) = handle.attach() {
            warn!(error = %e, "todos attach failed after creation");
        }
        let surface_id = handle.surface_id();
        self.registry.insert(handle);
        info!(surface = %surface_id, "todos view created");
        Ok(surface_id)
    }

    // -----------------------------------------------------------------------
    // Activation
    // -----------------------------------------------------------------------

    /// Fire the pending activation if its grace period has elapsed: mark
    /// the view as the single active one, attach it, and focus it.
    ///
    /// A pending id whose handle has been removed in the meantime is
    /// dropped silently.
    pub fn poll_activation(&mut self, now: Instant) -> Option<ServiceId> {
        let id = self.activation.take_due(now)?;
        if self.registry.lookup(&id).is_none() {
            debug!(service = %id, "pending activation dropped: view no longer exists");
            return None;
        }
        self.registry.mark_active(&id);
        let handle = self.registry.lookup_mut(&id)?;
        if let Err(e) = handle.attach() {
            warn!(service = %id, error = %e, "attach failed during activation");
        }
        if let Err(e) = handle.focus() {
            warn!(service = %id, error = %e, "focus failed during activation");
        }
        debug!(service = %id, "view activated");
        Some(id)
    }

    /// Deadline of the pending activation, for event-loop scheduling.
    pub fn next_activation_deadline(&self) -> Option<Instant> {
        self.activation.next_deadline()
    }

    // -----------------------------------------------------------------------
    // Visibility broadcasts
    // -----------------------------------------------------------------------

    /// Detach every view. The logical active mark is left untouched, so
    /// activation state survives a hide/show cycle.
    pub fn hide_all(&mut self) {
        debug!("hiding all views");
        self.detach_all();
    }

    /// Re-attach every view and re-apply the deferred activation to the
    /// active one. If the active view is restricted, nothing is shown.
    pub fn show_all(&mut self, now: Instant) {
        if self
            .registry
            .lookup_active()
            .is_some_and(|h| h.is_restricted())
        {
            debug!("show-all ignored: active view is restricted");
            return;
        }
        debug!("showing all views");
        self.attach_all();
        if let Some(id) = self.registry.lookup_active().map(|h| h.id().clone()) {
            self.activation.schedule(id, now);
        }
    }

    pub(crate) fn detach_all(&mut self) {
        for handle in self.registry.iter_mut() {
            if let Err(e) = handle.detach() {
                warn!(service = %handle.id(), error = %e, "detach failed");
            }
        }
    }

    pub(crate) fn attach_all(&mut self) {
        for handle in self.registry.iter_mut() {
            if let Err(e) = handle.attach() {
                warn!(service = %handle.id(), error = %e, "attach failed");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Focus coordination
    // -----------------------------------------------------------------------

    /// The host window regained focus: route OS focus back to the active
    /// view so keyboard input lands on visible content.
    pub fn window_focused(&mut self) {
        if let Some(handle) = self.registry.lookup_active_mut() {
            debug!(service = %handle.id(), "window focus, focusing active view");
            if let Err(e) = handle.focus() {
                warn!(service = %handle.id(), error = %e, "focus failed");
            }
        }
    }

    /// The shell navigated in-app. The settings overlay owns the whole
    /// window, so views are hidden while it is up.
    pub fn host_navigated(&mut self, url: &str) {
        if url.contains(SETTINGS_ROUTE) {
            debug!(url, "shell navigated to settings, hiding all views");
            self.detach_all();
        }
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Destroy every view, todos included. Best-effort per handle.
    pub fn shutdown(&mut self) {
        debug!(count = self.registry.len(), "destroying all views");
        self.activation.cancel();
        let ids: Vec<ServiceId> = self.registry.iter().map(|h| h.id().clone()).collect();
        for id in ids {
            self.registry.remove(&id);
        }
    }
}
