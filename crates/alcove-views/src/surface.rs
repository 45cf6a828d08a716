//! The browsing-surface seam.
//!
//! The core never talks to a concrete webview type. Everything it needs
//! from a browsing context is expressed by [`Surface`], and everything it
//! needs to create one by [`SurfaceFactory`]. Production code plugs in the
//! wry-backed implementation from [`crate::webview`]; the test suite plugs
//! in a mock and drives the controller without a display server.

use alcove_common::{Bounds, ServiceId, SurfaceId, ViewError};

/// Capability methods on one live browsing context.
///
/// The surface is exclusively owned by its `ViewHandle`; dropping the
/// handle releases the underlying context.
pub trait Surface {
    /// Opaque identifier minted by the factory at creation time.
    fn id(&self) -> SurfaceId;

    /// Load a URL, replacing current navigation state.
    fn load_url(&mut self, url: &str) -> Result<(), ViewError>;

    /// Reload the current page.
    fn reload(&mut self) -> Result<(), ViewError>;

    /// Reposition/resize within the host window.
    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), ViewError>;

    /// Show or hide the surface. Hidden surfaces keep their loaded state.
    fn set_visible(&mut self, visible: bool) -> Result<(), ViewError>;

    /// Give the surface OS keyboard focus.
    fn focus(&mut self) -> Result<(), ViewError>;

    fn devtools_open(&self) -> bool;

    fn open_devtools(&mut self);

    fn close_devtools(&mut self);
}

/// Everything the factory needs to construct one surface.
#[derive(Debug, Clone)]
pub struct SurfaceSpec {
    /// Service the surface belongs to (used for logging and event labels).
    pub service: ServiceId,
    /// Initial URL to load.
    pub url: String,
    /// Storage partition the browsing context is bound to.
    pub partition: String,
    /// Initial bounds within the host window.
    pub bounds: Bounds,
}

/// Creation seam for surfaces.
///
/// Creation is the one operation that can fail in a way the reconciler
/// must tolerate per-descriptor, so it is kept separate from [`Surface`].
pub trait SurfaceFactory {
    type Surface: Surface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<Self::Surface, ViewError>;
}
