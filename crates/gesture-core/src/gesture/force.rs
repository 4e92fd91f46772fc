#![forbid(unsafe_code)]

//! Force-press detector with hysteresis.
//!
//! Fires when pressure crosses the threshold from below; re-arms only once
//! pressure drops back below it. A platform without pressure support builds
//! a disabled detector that never fires.

use crate::gesture_event::GestureEvent;

#[derive(Debug, Clone)]
pub struct ForcePressDetector {
    enabled: bool,
    threshold: f64,
    armed: bool,
}

impl ForcePressDetector {
    #[must_use]
    pub fn new(threshold: f64, supported: bool) -> Self {
        Self {
            enabled: supported,
            threshold,
            armed: true,
        }
    }

    /// Feed the pressure of the primary contact for one sample.
    pub fn observe(&mut self, pressure: Option<f64>) -> Option<GestureEvent> {
        if !self.enabled {
            return None;
        }
        let force = pressure?;
        if force >= self.threshold {
            if self.armed {
                self.armed = false;
                return Some(GestureEvent::ForcePress { force });
            }
        } else {
            self.armed = true;
        }
        None
    }

    /// Re-arm for a new contact.
    pub fn reset(&mut self) {
        self.armed = true;
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
