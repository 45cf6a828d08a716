//! Ordered registry of live view handles.

use alcove_common::ServiceId;
use tracing::{debug, warn};

use crate::handle::ViewHandle;
use crate::surface::Surface;

/// All live views, keyed by service id, in insertion order.
///
/// Lookups are linear scans; the expected population is single-digit to
/// low-dozens of services. Insertion order matters for the "first
/// matching" fallback queries. Ids are unique — the reconciler looks up
/// before inserting, and `insert` replaces on collision rather than
/// duplicating.
///
/// A handle's surface is released exactly when the handle leaves the
/// registry (ownership: removal drops the handle, the handle drops the
/// surface).
pub struct ViewRegistry<S> {
    handles: Vec<ViewHandle<S>>,
}

impl<S: Surface> ViewRegistry<S> {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn lookup(&self, id: &ServiceId) -> Option<&ViewHandle<S>> {
        self.handles.iter().find(|h| h.id() == id)
    }

    pub fn lookup_mut(&mut self, id: &ServiceId) -> Option<&mut ViewHandle<S>> {
        self.handles.iter_mut().find(|h| h.id() == id)
    }

    /// First handle whose state marks it active.
    pub fn lookup_active(&self) -> Option<&ViewHandle<S>> {
        self.handles.iter().find(|h| h.is_active())
    }

    pub fn lookup_active_mut(&mut self) -> Option<&mut ViewHandle<S>> {
        self.handles.iter_mut().find(|h| h.is_active())
    }

    pub fn lookup_todos(&self) -> Option<&ViewHandle<S>> {
        self.handles.iter().find(|h| h.is_todos())
    }

    pub fn lookup_todos_mut(&mut self) -> Option<&mut ViewHandle<S>> {
        self.handles.iter_mut().find(|h| h.is_todos())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHandle<S>> {
        self.handles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ViewHandle<S>> {
        self.handles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Register a handle. Replaces any existing handle with the same id
    /// (the old surface is detached and released).
    pub fn insert(&mut self, handle: ViewHandle<S>) {
        if self.lookup(handle.id()).is_some() {
            warn!(service = %handle.id(), "duplicate view id, replacing existing handle");
            self.remove(&handle.id().clone());
        }
        self.handles.push(handle);
    }

    /// Detach and destroy the handle for `id`. Returns `false` if absent.
    /// Detach failures are logged; the handle is destroyed regardless.
    pub fn remove(&mut self, id: &ServiceId) -> bool {
        let Some(index) = self.handles.iter().position(|h| h.id() == id) else {
            return false;
        };
        let mut handle = self.handles.remove(index);
        if let Err(e) = handle.detach() {
            warn!(service = %id, error = %e, "detach failed during removal");
        }
        debug!(service = %id, "view destroyed");
        true
    }

    /// Mark `id` as the single active service view, clearing the mark on
    /// every other non-todos handle. The todos handle never carries the
    /// active mark and is left untouched.
    pub fn mark_active(&mut self, id: &ServiceId) {
        for handle in self.handles.iter_mut().filter(|h| !h.is_todos()) {
            handle.set_active(handle.id() == id);
        }
    }

    /// Logout teardown: detach and destroy every non-todos handle in one
    /// pass, best-effort per handle. The todos singleton survives.
    pub fn clear_services(&mut self) {
        let mut kept = Vec::with_capacity(1);
        for mut handle in self.handles.drain(..) {
            if handle.is_todos() {
                kept.push(handle);
                continue;
            }
            if let Err(e) = handle.detach() {
                warn!(service = %handle.id(), error = %e, "detach failed during logout");
            }
            debug!(service = %handle.id(), "view destroyed on logout");
        }
        self.handles = kept;
    }
}

impl<S: Surface> Default for ViewRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{handle, MockFactory};
    use alcove_common::ServiceId;

    #[test]
    fn lookup_by_id() {
        let mut factory = MockFactory::new();
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));
        registry.insert(handle(&mut factory, "b"));

        assert!(registry.lookup(&ServiceId::new("a")).is_some());
        assert!(registry.lookup(&ServiceId::new("b")).is_some());
        assert!(registry.lookup(&ServiceId::new("c")).is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_active_returns_first_match() {
        let mut factory = MockFactory::new();
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));
        registry.insert(handle(&mut factory, "b"));
        registry.insert(handle(&mut factory, "c"));

        registry.lookup_mut(&ServiceId::new("b")).unwrap().set_active(true);
        registry.lookup_mut(&ServiceId::new("c")).unwrap().set_active(true);

        // Insertion order decides: b comes before c.
        assert_eq!(registry.lookup_active().unwrap().id().as_str(), "b");
    }

    #[test]
    fn remove_destroys_surface() {
        let mut factory = MockFactory::new();
        let journal = std::rc::Rc::clone(&factory.journal);
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));

        assert!(registry.remove(&ServiceId::new("a")));
        assert!(registry.is_empty());
        assert_eq!(journal.borrow().destroyed, vec![ServiceId::new("a")]);
    }

    #[test]
    fn remove_missing_is_false() {
        let mut registry: ViewRegistry<crate::testkit::MockSurface> = ViewRegistry::new();
        assert!(!registry.remove(&ServiceId::new("ghost")));
    }

    #[test]
    fn insert_replaces_duplicate_id() {
        let mut factory = MockFactory::new();
        let journal = std::rc::Rc::clone(&factory.journal);
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));
        let first_surface = registry.lookup(&ServiceId::new("a")).unwrap().surface_id();

        registry.insert(handle(&mut factory, "a"));
        assert_eq!(registry.len(), 1);
        assert_ne!(
            registry.lookup(&ServiceId::new("a")).unwrap().surface_id(),
            first_surface
        );
        assert_eq!(journal.borrow().destroyed.len(), 1);
    }

    #[test]
    fn mark_active_is_exclusive() {
        let mut factory = MockFactory::new();
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));
        registry.insert(handle(&mut factory, "b"));
        registry.lookup_mut(&ServiceId::new("a")).unwrap().set_active(true);

        registry.mark_active(&ServiceId::new("b"));

        assert!(!registry.lookup(&ServiceId::new("a")).unwrap().is_active());
        assert!(registry.lookup(&ServiceId::new("b")).unwrap().is_active());
        assert_eq!(
            registry.iter().filter(|h| h.is_active()).count(),
            1
        );
    }

    #[test]
    fn clear_services_spares_nothing_but_todos() {
        let mut factory = MockFactory::new();
        let journal = std::rc::Rc::clone(&factory.journal);
        let mut registry = ViewRegistry::new();
        registry.insert(handle(&mut factory, "a"));
        registry.insert(handle(&mut factory, "b"));

        registry.clear_services();

        assert!(registry.is_empty());
        assert_eq!(journal.borrow().destroyed.len(), 2);
    }
}
