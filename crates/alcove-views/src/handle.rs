//! Handle to one managed service view.

use alcove_common::{Bounds, ServiceId, ServiceState, SurfaceId, ViewError};

use crate::surface::Surface;

/// Configuration portion of a view, replaced wholesale on reconcile.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub name: String,
    pub url: String,
    pub partition: String,
}

/// One live service view: an owned browsing surface plus the config/state
/// it was last reconciled with.
///
/// Dropping the handle releases the underlying surface; the registry is the
/// only place handles live, so removal from the registry is destruction.
pub struct ViewHandle<S> {
    id: ServiceId,
    surface: S,
    config: ViewConfig,
    state: ServiceState,
    is_todos: bool,
    attached: bool,
}

impl<S: Surface> ViewHandle<S> {
    /// Wrap a freshly created surface. The handle starts detached; the
    /// reconciler attaches it once it is registered.
    pub fn new(id: ServiceId, surface: S, config: ViewConfig, state: ServiceState) -> Self {
        Self {
            id,
            surface,
            config,
            state,
            is_todos: false,
            attached: false,
        }
    }

    /// Wrap the reserved todos surface. Exactly one todos handle may exist;
    /// the manager enforces this at creation time.
    pub fn new_todos(id: ServiceId, surface: S, config: ViewConfig) -> Self {
        Self {
            id,
            surface,
            config,
            state: ServiceState::default(),
            is_todos: true,
            attached: false,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn is_todos(&self) -> bool {
        self.is_todos
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn is_restricted(&self) -> bool {
        self.state.is_restricted
    }

    /// The underlying surface, for callers that need capability access.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    // -----------------------------------------------------------------------
    // Reconcile mutation
    // -----------------------------------------------------------------------

    /// Replace config and state wholesale. The surface is untouched so the
    /// browsing context keeps its loaded session and navigation state.
    pub fn update(&mut self, config: ViewConfig, state: ServiceState) {
        self.config = config;
        self.state = state;
    }

    /// Overwrite the logical active mark (single-active invariant is kept
    /// by the registry, which clears the mark on every other handle).
    pub fn set_active(&mut self, active: bool) {
        self.state.is_active = active;
    }

    // -----------------------------------------------------------------------
    // Surface operations
    // -----------------------------------------------------------------------

    /// Make the surface visible in the host window.
    pub fn attach(&mut self) -> Result<(), ViewError> {
        self.surface.set_visible(true)?;
        self.attached = true;
        Ok(())
    }

    /// Hide the surface. Loaded state is preserved.
    pub fn detach(&mut self) -> Result<(), ViewError> {
        self.surface.set_visible(false)?;
        self.attached = false;
        Ok(())
    }

    pub fn focus(&mut self) -> Result<(), ViewError> {
        self.surface.focus()
    }

    pub fn reload(&mut self) -> Result<(), ViewError> {
        self.surface.reload()
    }

    pub fn navigate(&mut self, url: &str) -> Result<(), ViewError> {
        self.surface.load_url(url)
    }

    pub fn resize(&mut self, bounds: Bounds) -> Result<(), ViewError> {
        self.surface.set_bounds(bounds)
    }

    /// Toggle the dev-tools panel: open detached if closed, close if open.
    pub fn toggle_devtools(&mut self) {
        if self.surface.devtools_open() {
            self.surface.close_devtools();
        } else {
            self.surface.open_devtools();
        }
    }
}
