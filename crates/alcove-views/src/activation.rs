//! Deferred activation scheduling.
//!
//! Activating a view (bring to front + OS focus) is delayed by a short
//! grace period so attach/layout settles before focus moves — a UX
//! debounce, not a correctness requirement. At most one activation is
//! pending at a time and a new request supersedes the old one
//! (last-scheduled-wins), which is what keeps the single-active invariant
//! honest under rapid reconciles.
//!
//! The queue never touches real timers. The owner polls it with an
//! `Instant` of its choosing, so tests drive time synthetically and the
//! host loop can sleep until [`ActivationQueue::next_deadline`].

use std::time::{Duration, Instant};

use alcove_common::ServiceId;
use tracing::debug;

/// Grace period before a newly activated view steals focus.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingActivation {
    id: ServiceId,
    due: Instant,
}

/// Holds at most one pending deferred activation.
#[derive(Debug)]
pub struct ActivationQueue {
    delay: Duration,
    pending: Option<PendingActivation>,
}

impl ActivationQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// A queue that fires on the next poll. Used in tests and anywhere the
    /// grace period is unwanted.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Schedule activation of `id`, superseding any pending entry.
    pub fn schedule(&mut self, id: ServiceId, now: Instant) {
        if let Some(prev) = &self.pending {
            debug!(superseded = %prev.id, scheduled = %id, "pending activation replaced");
        }
        self.pending = Some(PendingActivation {
            id,
            due: now + self.delay,
        });
    }

    /// Drop any pending activation.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending_id(&self) -> Option<&ServiceId> {
        self.pending.as_ref().map(|p| &p.id)
    }

    /// When the pending entry fires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending entry if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<ServiceId> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| p.id)
        } else {
            None
        }
    }
}

impl Default for ActivationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DELAY)
    }
}
