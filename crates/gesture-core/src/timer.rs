#![forbid(unsafe_code)]

//! Host-driven single-shot timers.
//!
//! The engine never schedules callbacks. A [`OneShot`] only remembers a
//! deadline; the owner polls it with the current time from input handling or
//! the animation tick. Cancelling clears the deadline, so a cancelled timer
//! can never fire: [`poll`](OneShot::poll) checks that the handle is still
//! armed before reporting expiry, and disarms on the firing poll.

use std::time::Duration;

/// A cancellable single-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShot {
    deadline: Option<Duration>,
}

impl OneShot {
    /// An unarmed timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) to fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Clear the handle. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fire if armed and due. Fires at most once per arming.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}
