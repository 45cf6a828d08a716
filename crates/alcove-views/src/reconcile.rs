//! Reconciliation: diff a desired descriptor list against live views.

use std::collections::HashMap;
use std::time::Instant;

use alcove_common::{ServiceDescriptor, ServiceId, SurfaceId};
use tracing::{debug, warn};

use crate::handle::{ViewConfig, ViewHandle};
use crate::manager::ViewManager;
use crate::surface::{SurfaceFactory, SurfaceSpec};

fn view_config(d: &ServiceDescriptor) -> ViewConfig {
    ViewConfig {
        name: d.name.clone(),
        url: d.url.clone(),
        partition: d.partition.clone(),
    }
}

impl<F: SurfaceFactory> ViewManager<F> {
    /// Bring live views in line with the full desired list.
    ///
    /// Three passes over the batch:
    /// 1. Per descriptor in input order: update the existing handle in
    ///    place (config/state replaced wholesale, surface reused so loaded
    ///    session state survives), or create a surface, attach it, and
    ///    register a new handle. A creation failure skips only that
    ///    descriptor.
    /// 2. Remove every non-todos handle whose id is absent from the list.
    /// 3. Evaluate activation: a restricted active descriptor hides all
    ///    views; otherwise the active descriptor gets a deferred
    ///    activation, last-scheduled-wins.
    ///
    /// Returns the id → surface-id mapping for every surviving handle.
    /// Reconciling the same list twice is a no-op on the second call.
    pub fn reconcile(
        &mut self,
        descriptors: &[ServiceDescriptor],
        now: Instant,
    ) -> HashMap<ServiceId, SurfaceId> {
        for d in descriptors {
            if let Some(handle) = self.registry.lookup_mut(&d.id) {
                handle.update(view_config(d), d.state.clone());
                continue;
            }

            debug!(service = %d.id, url = %d.url, "creating view");
            let spec = SurfaceSpec {
                service: d.id.clone(),
                url: d.url.clone(),
                partition: d.partition.clone(),
                bounds: self.service_bounds,
            };
            match self.factory.create(&spec) {
                Ok(surface) => {
                    let mut handle =
                        ViewHandle::new(d.id.clone(), surface, view_config(d), d.state.clone());
                    if let Err(e) = handle.attach() {
                        warn!(service = %d.id, error = %e, "attach failed after creation");
                    }
                    self.registry.insert(handle);
                }
                Err(e) => {
                    // One bad service must not block the rest of the batch.
                    warn!(service = %d.id, error = %e, "could not initialize view");
                }
            }
        }

        let stale: Vec<ServiceId> = self
            .registry
            .iter()
            .filter(|h| !h.is_todos() && !descriptors.iter().any(|d| &d.id == h.id()))
            .map(|h| h.id().clone())
            .collect();
        for id in stale {
            debug!(service = %id, "removing unused view");
            self.registry.remove(&id);
        }

        for d in descriptors {
            if !d.state.is_active || self.registry.lookup(&d.id).is_none() {
                continue;
            }
            if d.state.is_restricted {
                debug!(service = %d.id, "active view is restricted, hiding all views");
                self.activation.cancel();
                self.detach_all();
            } else {
                self.activation.schedule(d.id.clone(), now);
            }
        }

        self.registry
            .iter()
            .map(|h| (h.id().clone(), h.surface_id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{active_desc, desc, restricted_active_desc, MockFactory};

    fn manager() -> ViewManager<MockFactory> {
        ViewManager::with_activation_delay(MockFactory::new(), std::time::Duration::ZERO)
    }

    #[test]
    fn creates_views_for_unseen_ids() {
        let mut mgr = manager();
        let mapping = mgr.reconcile(&[desc("a"), desc("b")], Instant::now());

        assert_eq!(mapping.len(), 2);
        assert_eq!(mgr.registry().len(), 2);
        assert!(mgr.registry().lookup(&ServiceId::new("a")).unwrap().is_attached());
        assert_eq!(mgr.factory().journal.borrow().created.len(), 2);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut mgr = manager();
        let now = Instant::now();
        let list = [desc("a"), desc("b")];
        let first = mgr.reconcile(&list, now);
        let second = mgr.reconcile(&list, now);

        assert_eq!(first, second);
        let journal = mgr.factory().journal.borrow();
        assert_eq!(journal.created.len(), 2, "second pass must not create");
        assert_eq!(journal.destroyed.len(), 0, "second pass must not destroy");
    }

    #[test]
    fn update_reuses_the_surface() {
        let mut mgr = manager();
        let now = Instant::now();
        mgr.reconcile(&[desc("a")], now);
        let surface_before = mgr.registry().lookup(&ServiceId::new("a")).unwrap().surface_id();

        let mut changed = desc("a");
        changed.name = "Renamed".into();
        changed.url = "https://a.example.com/inbox".into();
        mgr.reconcile(&[changed], now);

        let handle = mgr.registry().lookup(&ServiceId::new("a")).unwrap();
        assert_eq!(handle.surface_id(), surface_before);
        assert_eq!(handle.config().name, "Renamed");
        assert_eq!(handle.config().url, "https://a.example.com/inbox");
        // The browsing context itself was not re-navigated.
        assert_eq!(handle.surface().url, "https://a.example.com");
    }

    #[test]
    fn state_is_replaced_not_merged() {
        let mut mgr = manager();
        let now = Instant::now();
        let mut d = desc("a");
        d.state.team = "acme".into();
        d.state.is_dark_mode_enabled = true;
        mgr.reconcile(&[d], now);

        mgr.reconcile(&[desc("a")], now);
        let state = mgr.registry().lookup(&ServiceId::new("a")).unwrap().state();
        assert_eq!(state.team, "");
        assert!(!state.is_dark_mode_enabled);
    }

    #[test]
    fn absent_ids_are_destroyed() {
        let mut mgr = manager();
        let now = Instant::now();
        mgr.reconcile(&[desc("a"), desc("b")], now);
        let mapping = mgr.reconcile(&[desc("a")], now);

        assert!(mgr.registry().lookup(&ServiceId::new("b")).is_none());
        assert!(!mapping.contains_key(&ServiceId::new("b")));
        assert_eq!(
            mgr.factory().journal.borrow().destroyed,
            vec![ServiceId::new("b")]
        );
    }

    #[test]
    fn creation_failure_skips_descriptor_but_not_batch() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::failing_for(&["b"]),
            std::time::Duration::ZERO,
        );
        let mapping = mgr.reconcile(&[desc("a"), desc("b"), desc("c")], Instant::now());

        assert_eq!(mgr.registry().len(), 2);
        assert!(mapping.contains_key(&ServiceId::new("a")));
        assert!(!mapping.contains_key(&ServiceId::new("b")));
        assert!(mapping.contains_key(&ServiceId::new("c")));
    }

    #[test]
    fn failed_descriptor_retries_on_next_pass() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::failing_for(&["b"]),
            std::time::Duration::ZERO,
        );
        let now = Instant::now();
        mgr.reconcile(&[desc("a"), desc("b")], now);
        assert_eq!(mgr.registry().len(), 1);

        mgr.factory_mut().fail_for.clear();
        let mapping = mgr.reconcile(&[desc("a"), desc("b")], now);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn activation_is_deferred_until_polled() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::new(),
            std::time::Duration::from_millis(5),
        );
        let t0 = Instant::now();
        mgr.reconcile(&[active_desc("a"), desc("b")], t0);

        let handle = mgr.registry().lookup(&ServiceId::new("a")).unwrap();
        assert_eq!(handle.surface().focus_count, 0, "no focus before grace period");

        assert_eq!(mgr.poll_activation(t0), None);
        let fired = mgr.poll_activation(t0 + std::time::Duration::from_millis(5));
        assert_eq!(fired, Some(ServiceId::new("a")));
        let handle = mgr.registry().lookup(&ServiceId::new("a")).unwrap();
        assert_eq!(handle.surface().focus_count, 1);
    }

    #[test]
    fn at_most_one_view_marked_active() {
        let mut mgr = manager();
        let now = Instant::now();
        mgr.reconcile(&[active_desc("a"), desc("b")], now);
        mgr.poll_activation(now);

        // The shell moves activity to `b`.
        mgr.reconcile(&[desc("a"), active_desc("b")], now);
        mgr.poll_activation(now);

        let active: Vec<_> = mgr
            .registry()
            .iter()
            .filter(|h| h.is_active())
            .map(|h| h.id().clone())
            .collect();
        assert_eq!(active, vec![ServiceId::new("b")]);
    }

    #[test]
    fn rapid_activations_last_scheduled_wins() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::new(),
            std::time::Duration::from_millis(5),
        );
        let t0 = Instant::now();
        mgr.reconcile(&[active_desc("a"), desc("b")], t0);
        // Second reconcile lands before the first activation fires.
        mgr.reconcile(
            &[desc("a"), active_desc("b")],
            t0 + std::time::Duration::from_millis(1),
        );

        assert_eq!(mgr.poll_activation(t0 + std::time::Duration::from_millis(2)), None);
        let fired = mgr.poll_activation(t0 + std::time::Duration::from_millis(10));
        assert_eq!(fired, Some(ServiceId::new("b")));
        assert_eq!(
            mgr.registry().iter().filter(|h| h.is_active()).count(),
            1
        );
    }

    #[test]
    fn restricted_active_view_hides_everything() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::new(),
            std::time::Duration::from_millis(5),
        );
        let t0 = Instant::now();
        mgr.reconcile(&[desc("a"), restricted_active_desc("b"), desc("c")], t0);

        assert!(mgr.registry().iter().all(|h| !h.is_attached()));
        // Nothing pending: the restricted evaluation cancelled activation.
        assert_eq!(mgr.next_activation_deadline(), None);
        assert_eq!(
            mgr.poll_activation(t0 + std::time::Duration::from_millis(10)),
            None
        );
        assert!(mgr.registry().iter().all(|h| !h.is_attached()));
    }

    #[test]
    fn restricted_hides_views_created_later_in_the_batch() {
        let mut mgr = manager();
        // The restricted active descriptor comes first; `z` is created
        // after it. Activation is evaluated over the whole batch, so `z`
        // still ends up hidden.
        mgr.reconcile(&[restricted_active_desc("a"), desc("z")], Instant::now());
        assert!(mgr.registry().iter().all(|h| !h.is_attached()));
    }

    #[test]
    fn active_descriptor_that_failed_to_create_is_not_scheduled() {
        let mut mgr = ViewManager::with_activation_delay(
            MockFactory::failing_for(&["a"]),
            std::time::Duration::from_millis(5),
        );
        mgr.reconcile(&[active_desc("a")], Instant::now());
        assert_eq!(mgr.next_activation_deadline(), None);
    }

    #[test]
    fn mapping_includes_todos() {
        let mut mgr = manager();
        let todos_surface = mgr
            .ensure_todos("https://todos.example.com", "persist:todos")
            .unwrap();
        let mapping = mgr.reconcile(&[desc("a")], Instant::now());

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&ServiceId::new("todos")), Some(&todos_surface));
    }
}
