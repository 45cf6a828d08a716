//! wry-backed surface implementation.
//!
//! Each service view is a child webview of the host window, bound to a
//! per-partition [`wry::WebContext`] so login sessions persist across runs
//! and services stay isolated from each other.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebView, WebViewBuilder};

use alcove_common::{Bounds, SurfaceId, ViewError};

use crate::events::{PageLoadState, ViewEvent};
use crate::surface::{Surface, SurfaceFactory, SurfaceSpec};

/// Shared event buffer drained by the host event loop.
pub type ViewEventSink = Arc<Mutex<Vec<ViewEvent>>>;

/// Convert logical [`Bounds`] to a wry `Rect`.
pub fn bounds_to_wry(bounds: Bounds) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(bounds.x, bounds.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(bounds.width, bounds.height)),
    }
}

/// Directory name for a partition's browsing data. Partition identifiers
/// come from the shell (`persist:slack-1`) and may contain path
/// separators or drive-colon characters.
fn partition_dir(partition: &str) -> String {
    partition.replace([':', '/', '\\'], "_")
}

fn surface_err(e: wry::Error) -> ViewError {
    ViewError::Surface(e.to_string())
}

/// A live wry child webview.
pub struct WrySurface {
    webview: WebView,
    id: SurfaceId,
}

impl Surface for WrySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
        self.webview.load_url(url).map_err(surface_err)
    }

    fn reload(&mut self) -> Result<(), ViewError> {
        self.webview
            .evaluate_script("location.reload()")
            .map_err(surface_err)
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), ViewError> {
        self.webview
            .set_bounds(bounds_to_wry(bounds))
            .map_err(surface_err)
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), ViewError> {
        self.webview.set_visible(visible).map_err(surface_err)
    }

    fn focus(&mut self) -> Result<(), ViewError> {
        self.webview.focus().map_err(surface_err)
    }

    fn devtools_open(&self) -> bool {
        self.webview.is_devtools_open()
    }

    fn open_devtools(&mut self) {
        self.webview.open_devtools();
    }

    fn close_devtools(&mut self) {
        self.webview.close_devtools();
    }
}

/// Builds wry child webviews inside one host window.
pub struct WryFactory<W: HasWindowHandle> {
    window: W,
    data_root: PathBuf,
    user_agent: Option<String>,
    contexts: HashMap<String, WebContext>,
    events: ViewEventSink,
    next_id: u64,
}

impl<W: HasWindowHandle> WryFactory<W> {
    /// `data_root` is where partition browsing data lives, one
    /// subdirectory per partition.
    pub fn new(window: W, data_root: PathBuf) -> Self {
        Self {
            window,
            data_root,
            user_agent: None,
            contexts: HashMap::new(),
            events: Arc::new(Mutex::new(Vec::new())),
            next_id: 0,
        }
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Clone of the event sink, taken by the host loop before the factory
    /// moves into the manager.
    pub fn event_sink(&self) -> ViewEventSink {
        Arc::clone(&self.events)
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<ViewEvent> {
        let mut events = self.events.lock().unwrap();
        std::mem::take(&mut *events)
    }
}

impl<W: HasWindowHandle> SurfaceFactory for WryFactory<W> {
    type Surface = WrySurface;

    fn create(&mut self, spec: &SurfaceSpec) -> Result<WrySurface, ViewError> {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        let service = spec.service.clone();

        let context = self
            .contexts
            .entry(spec.partition.clone())
            .or_insert_with(|| {
                WebContext::new(Some(self.data_root.join(partition_dir(&spec.partition))))
            });

        let mut builder = WebViewBuilder::new_with_web_context(context)
            .with_bounds(bounds_to_wry(spec.bounds))
            .with_visible(false)
            .with_focused(false)
            .with_devtools(true)
            .with_url(spec.url.as_str());

        if let Some(ua) = &self.user_agent {
            builder = builder.with_user_agent(ua);
        }

        // Page load handler
        let load_events = Arc::clone(&self.events);
        let load_service = service.clone();
        builder = builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(service = %load_service, ?state, url = %url, "page load");
            if let Ok(mut evts) = load_events.lock() {
                evts.push(ViewEvent::PageLoad {
                    service: load_service.clone(),
                    state,
                    url,
                });
            }
        });

        // Title change handler
        let title_events = Arc::clone(&self.events);
        let title_service = service.clone();
        builder = builder.with_document_title_changed_handler(move |title| {
            debug!(service = %title_service, title = %title, "title changed");
            if let Ok(mut evts) = title_events.lock() {
                evts.push(ViewEvent::TitleChanged {
                    service: title_service.clone(),
                    title,
                });
            }
        });

        // Navigation handler — services are arbitrary web apps, so
        // navigations are allowed and recorded for the host loop.
        let nav_events = Arc::clone(&self.events);
        let nav_service = service.clone();
        builder = builder.with_navigation_handler(move |url| {
            debug!(service = %nav_service, url = %url, "navigation requested");
            if let Ok(mut evts) = nav_events.lock() {
                evts.push(ViewEvent::NavigationRequested {
                    service: nav_service.clone(),
                    url,
                });
            }
            true
        });

        let webview = builder
            .build_as_child(&self.window)
            .map_err(|e| ViewError::SurfaceCreation {
                service: service.to_string(),
                reason: e.to_string(),
            })?;

        debug!(service = %service, surface = %id, url = %spec.url, "webview created");

        Ok(WrySurface { webview, id })
    }
}
