#![forbid(unsafe_code)]

//! Long-press detector.
//!
//! Armed on contact-down. Movement beyond the jitter threshold or lifting
//! before the delay cancels the timer. Fires at most once per contact.

use std::time::Duration;

use crate::geometry::Point;
use crate::gesture_event::{GestureEvent, LongPress};
use crate::sample::{PointerId, PointerSample};
use crate::timer::OneShot;

#[derive(Debug, Clone)]
pub struct LongPressDetector {
    delay: Duration,
    jitter: f64,
    origin: Option<(PointerId, Point, Duration)>,
    timer: OneShot,
    fired: bool,
}

impl LongPressDetector {
    #[must_use]
    pub fn new(delay: Duration, jitter: f64) -> Self {
        Self {
            delay,
            jitter,
            origin: None,
            timer: OneShot::new(),
            fired: false,
        }
    }

    /// Arm for a new contact.
    pub fn begin(&mut self, sample: &PointerSample) {
        self.origin = Some((sample.id, sample.position(), sample.timestamp));
        self.timer.arm(sample.timestamp, self.delay);
        self.fired = false;
    }

    /// Track movement of the pressed contact. Returns `true` if the contact
    /// has left the jitter radius (which cancels the timer).
    pub fn on_move(&mut self, sample: &PointerSample) -> bool {
        let Some((id, origin, _)) = self.origin else {
            return false;
        };
        if id != sample.id {
            return false;
        }
        if origin.distance(sample.position()) > self.jitter {
            self.timer.cancel();
            return true;
        }
        false
    }

    /// Fire if the delay elapsed while the contact stayed put.
    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        if self.fired || !self.timer.poll(now) {
            return None;
        }
        let (_, position, down_at) = self.origin?;
        self.fired = true;
        Some(GestureEvent::LongPress(LongPress {
            position,
            held: now.saturating_sub(down_at),
        }))
    }

    /// When the timer will fire, if armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.timer.deadline()
    }

    /// Cancel the pending timer (release, second contact, new session).
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Forget the contact entirely.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.origin = None;
        self.fired = false;
    }

    #[inline]
    #[must_use]
    pub fn fired(&self) -> bool {
        self.fired
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }
}
