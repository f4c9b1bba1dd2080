//! Single-slot transient notification.
//!
//! At most one notification is visible at a time; a newer one replaces
//! the current one immediately, with no queue. Each timed notification
//! carries a sequence ticket, and its expiry timer clears the slot only
//! while that ticket is still current - a stale timer can never dismiss
//! a newer notification.

use sprintdeck_core::{Notification, Severity};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// How long a notification stays visible unless told otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

struct Inner {
    slot: watch::Sender<Option<Notification>>,
    seq: AtomicU64,
}

/// Broadcaster for the single transient notification slot.
///
/// Cloning is cheap and shares the slot.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot,
                seq: AtomicU64::new(0),
            }),
        }
    }

    /// Show a notification with the default lifetime.
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.show_for(message, severity, Some(DEFAULT_NOTIFICATION_DURATION));
    }

    /// Show a notification. `None` or a zero duration means it stays
    /// until replaced or explicitly cleared.
    ///
    /// Must be called from within a tokio runtime when a duration is
    /// given; the expiry timer runs as a spawned task.
    pub fn show_for(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Option<Duration>,
    ) {
        let ticket = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner
            .slot
            .send_replace(Some(Notification::new(message, severity)));

        if let Some(duration) = duration.filter(|d| !d.is_zero()) {
            let notifier = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                notifier.expire(ticket);
            });
        }
    }

    /// Dismiss the current notification. Idempotent.
    pub fn clear(&self) {
        self.inner.seq.fetch_add(1, Ordering::SeqCst);
        self.inner.slot.send_replace(None);
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.borrow().clone()
    }

    /// Subscribe to slot changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.slot.subscribe()
    }

    /// Timer expiry: clears the slot only if the notification that
    /// scheduled this timer is still the one showing.
    fn expire(&self, ticket: u64) {
        self.inner.slot.send_if_modified(|slot| {
            if self.inner.seq.load(Ordering::SeqCst) != ticket {
                debug!("notification timer superseded, leaving slot alone");
                return false;
            }
            if slot.is_none() {
                return false;
            }
            *slot = None;
            true
        });
    }
}
