//! Mock surface + factory used by the controller tests.
//!
//! The mock records every capability call on plain fields so tests can
//! assert visibility, focus, and destruction without a display server.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use alcove_common::{Bounds, ServiceDescriptor, ServiceId, ServiceState, SurfaceId, ViewError};

use crate::handle::{ViewConfig, ViewHandle};
use crate::surface::{Surface, SurfaceFactory, SurfaceSpec};

/// Factory-level event log shared between a test and its factory.
#[derive(Default)]
pub(crate) struct Journal {
    pub created: Vec<ServiceId>,
    pub destroyed: Vec<ServiceId>,
}

pub(crate) type SharedJournal = Rc<RefCell<Journal>>;

pub(crate) struct MockSurface {
    id: SurfaceId,
    service: ServiceId,
    journal: SharedJournal,
    pub visible: bool,
    pub focus_count: usize,
    pub reload_count: usize,
    pub devtools: bool,
    pub url: String,
    pub bounds: Bounds,
    /// When set, every fallible capability call fails.
    pub fail_ops: bool,
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.journal.borrow_mut().destroyed.push(self.service.clone());
    }
}

impl MockSurface {
    fn check(&self) -> Result<(), ViewError> {
        if self.fail_ops {
            Err(ViewError::Surface("mock op failure".into()))
        } else {
            Ok(())
        }
    }
}

impl Surface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.check()?;
        self.url = url.to_string();
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ViewError> {
        self.check()?;
        self.reload_count += 1;
        Ok(())
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), ViewError> {
        self.check()?;
        self.bounds = bounds;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), ViewError> {
        self.check()?;
        self.visible = visible;
        Ok(())
    }

    fn focus(&mut self) -> Result<(), ViewError> {
        self.check()?;
        self.focus_count += 1;
        Ok(())
    }

    fn devtools_open(&self) -> bool {
        self.devtools
    }

    fn open_devtools(&mut self) {
        self.devtools = true;
    }

    fn close_devtools(&mut self) {
        self.devtools = false;
    }
}

#[derive(Default)]
pub(crate) struct MockFactory {
    next_id: u64,
    pub journal: SharedJournal,
    /// Service ids whose creation fails.
    pub fail_for: HashSet<ServiceId>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            fail_for: ids.iter().map(|id| ServiceId::new(*id)).collect(),
            ..Self::default()
        }
    }
}

impl SurfaceFactory for MockFactory {
    type Surface = MockSurface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<MockSurface, ViewError> {
        if self.fail_for.contains(&spec.service) {
            return Err(ViewError::SurfaceCreation {
                service: spec.service.to_string(),
                reason: "mock creation failure".into(),
            });
        }
        self.next_id += 1;
        self.journal.borrow_mut().created.push(spec.service.clone());
        Ok(MockSurface {
            id: SurfaceId(self.next_id),
            service: spec.service.clone(),
            journal: Rc::clone(&self.journal),
            visible: false,
            focus_count: 0,
            reload_count: 0,
            devtools: false,
            url: spec.url.clone(),
            bounds: spec.bounds,
            fail_ops: false,
        })
    }
}

/// A plain descriptor with sensible defaults for tests.
pub(crate) fn desc(id: &str) -> ServiceDescriptor {
    ServiceDescriptor {
        id: ServiceId::new(id),
        name: id.to_uppercase(),
        url: format!("https://{id}.example.com"),
        partition: format!("persist:{id}"),
        state: ServiceState::default(),
        recipe_id: id.to_string(),
    }
}

pub(crate) fn active_desc(id: &str) -> ServiceDescriptor {
    let mut d = desc(id);
    d.state.is_active = true;
    d
}

pub(crate) fn restricted_active_desc(id: &str) -> ServiceDescriptor {
    let mut d = active_desc(id);
    d.state.is_restricted = true;
    d
}

/// Build a registered-style handle directly, bypassing the reconciler.
pub(crate) fn handle(factory: &mut MockFactory, id: &str) -> ViewHandle<MockSurface> {
    let d = desc(id);
    let surface = factory
        .create(&SurfaceSpec {
            service: d.id.clone(),
            url: d.url.clone(),
            partition: d.partition.clone(),
            bounds: Bounds::ZERO,
        })
        .expect("mock creation");
    ViewHandle::new(
        d.id,
        surface,
        ViewConfig {
            name: d.name,
            url: d.url,
            partition: d.partition,
        },
        d.state,
    )
}
