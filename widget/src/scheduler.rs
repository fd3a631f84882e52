//! Debounced scheduling of recompute actions.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// How a recompute was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Explicit action, currency change, or confirmed input: runs now.
    Immediate,
    /// Continuous input change: runs once a quiet period has passed.
    Debounced,
}

/// Schedules recompute actions, collapsing bursts of debounced triggers.
///
/// The scheduler owns at most one pending timer. A debounced trigger cancels
/// and replaces the pending one together with its payload, so the action
/// that eventually fires always carries the state of the last trigger.
/// Immediate triggers cancel the pending timer and run their action
/// synchronously. There is no cancellation beyond superseding triggers, and
/// a timer whose action has already started is past recall.
///
/// Debounced triggers must be issued from within a tokio runtime.
pub struct UpdateScheduler {
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl UpdateScheduler {
    /// Create a scheduler with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Request a recompute.
    pub fn trigger<F>(&self, kind: Trigger, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match kind {
            Trigger::Immediate => {
                self.cancel_pending();
                action();
            }
            Trigger::Debounced => {
                let quiet = self.quiet_period;
                let mut pending = self.pending.lock();
                if let Some(previous) = pending.take() {
                    previous.abort();
                    debug!("Pending recompute superseded");
                }
                *pending = Some(tokio::spawn(async move {
                    tokio::time::sleep(quiet).await;
                    action();
                }));
            }
        }
    }

    /// Whether a debounced recompute is waiting out its quiet period.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}
