#![forbid(unsafe_code)]

//! Single-contact pan tracking.
//!
//! Emits one pan per processed move with the incremental delta, the offset
//! from contact-down and a per-tick velocity (the last delta clamped to the
//! momentum cap). The velocity is what momentum scrolling inherits on release.

use crate::geometry::{Point, Vector};
use crate::gesture_event::PanGesture;
use crate::sample::PointerSample;

#[derive(Debug, Clone)]
pub struct PanTracker {
    max_velocity: f64,
    origin: Option<Point>,
    last: Point,
    velocity: Vector,
}

impl PanTracker {
    #[must_use]
    pub fn new(max_velocity: f64) -> Self {
        Self {
            max_velocity,
            origin: None,
            last: Point::ZERO,
            velocity: Vector::ZERO,
        }
    }

    pub fn begin(&mut self, sample: &PointerSample) {
        self.origin = Some(sample.position());
        self.last = sample.position();
        self.velocity = Vector::ZERO;
    }

    /// Advance to `sample`. `None` if not tracking or the contact did not move.
    pub fn update(&mut self, sample: &PointerSample) -> Option<PanGesture> {
        let origin = self.origin?;
        let position = sample.position();
        let delta = position.delta_from(self.last);
        if delta == Vector::ZERO {
            return None;
        }
        self.last = position;
        self.velocity = delta.clamp_axes(self.max_velocity);
        let offset = position.delta_from(origin);
        Some(PanGesture {
            delta_x: delta.x,
            delta_y: delta.y,
            offset_x: offset.x,
            offset_y: offset.y,
            velocity: self.velocity,
            is_momentum: false,
        })
    }

    /// Velocity captured from the most recent move.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.velocity = Vector::ZERO;
    }
}
