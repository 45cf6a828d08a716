//! View event types.

use alcove_common::ServiceId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded (DOMContentLoaded + resources).
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by live surfaces, drained by the host event loop.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// Page load state changed. Carries the URL.
    PageLoad {
        service: ServiceId,
        state: PageLoadState,
        url: String,
    },
    /// Document title changed.
    TitleChanged { service: ServiceId, title: String },
    /// The page requested a navigation.
    NavigationRequested { service: ServiceId, url: String },
}
