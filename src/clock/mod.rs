//! Timer scheduling seam.
//!
//! The engine never sleeps or spawns threads. It asks a `Scheduler` for
//! one-shot timers and the host calls `MemoryGameEngine::timer_fired`
//! when one elapses. Handles make every timer cancellable, so a new
//! deal can retire the previous session's timers before they land.
//!
//! `ManualScheduler` is the in-crate implementation: it just records
//! what was scheduled and lets the caller fire timers explicitly.
//! Tests and turn-based hosts drive it directly; async hosts implement
//! `Scheduler` over their runtime instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled one-shot timer.
///
/// Opaque to the engine: handles are only compared for identity, never
/// interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

impl TimerHandle {
    /// Create a new timer handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Provider of cancellable one-shot timers.
pub trait Scheduler {
    /// Arrange for the host to call back after `delay`.
    ///
    /// Each call must return a handle never handed out before; the
    /// engine compares handles to tell live timers from stale ones.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a scheduled timer.
    ///
    /// Cancelling a handle that already fired or was never scheduled
    /// must be a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// A timer that has been scheduled but not yet fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTimer {
    /// Handle identifying the timer.
    pub handle: TimerHandle,

    /// Delay it was scheduled with.
    pub delay: Duration,
}

/// Scheduler driven explicitly by the caller.
///
/// Records scheduled timers in order and fires them on demand. There is
/// no clock: `fire_next` pops in scheduling order, and `fire` picks a
/// specific timer.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use flipmatch::clock::{ManualScheduler, Scheduler};
///
/// let mut scheduler = ManualScheduler::new();
/// let handle = scheduler.schedule(Duration::from_secs(1));
///
/// assert!(scheduler.is_scheduled(handle));
/// assert_eq!(scheduler.fire_next(), Some(handle));
/// assert!(scheduler.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    pending: Vec<ScheduledTimer>,
    next_handle: u64,
}

impl ManualScheduler {
    /// Create a new scheduler with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers scheduled and not yet fired or cancelled, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[ScheduledTimer] {
        &self.pending
    }

    /// Is this handle still pending?
    #[must_use]
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the oldest pending timer's handle.
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0).handle)
        }
    }

    /// Remove a specific pending timer.
    ///
    /// Returns false if the handle was not pending.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|t| t.handle == handle) {
            Some(slot) => {
                self.pending.remove(slot);
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;

        self.pending.push(ScheduledTimer { handle, delay });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = ManualScheduler::new();

        let a = scheduler.schedule(Duration::from_secs(1));
        let b = scheduler.schedule(Duration::from_secs(1));

        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn test_fire_next_is_fifo() {
        let mut scheduler = ManualScheduler::new();

        let a = scheduler.schedule(Duration::from_secs(1));
        let b = scheduler.schedule(Duration::from_secs(2));

        assert_eq!(scheduler.fire_next(), Some(a));
        assert_eq!(scheduler.fire_next(), Some(b));
        assert_eq!(scheduler.fire_next(), None);
    }

    #[test]
    fn test_fire_specific_timer() {
        let mut scheduler = ManualScheduler::new();

        let a = scheduler.schedule(Duration::from_secs(1));
        let b = scheduler.schedule(Duration::from_secs(1));

        assert!(scheduler.fire(b));
        assert!(!scheduler.fire(b));
        assert!(scheduler.is_scheduled(a));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut scheduler = ManualScheduler::new();

        let handle = scheduler.schedule(Duration::from_millis(500));
        assert!(scheduler.is_scheduled(handle));

        scheduler.cancel(handle);
        assert!(!scheduler.is_scheduled(handle));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_unknown_is_noop() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_secs(1));

        scheduler.cancel(TimerHandle::new(99));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_pending_records_delay() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(250));

        let pending = scheduler.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].handle, handle);
        assert_eq!(pending[0].delay, Duration::from_millis(250));
    }
}
