#![forbid(unsafe_code)]

//! Two-contact pinch/rotate recognizer.
//!
//! When the contact count becomes two, the recognizer captures the initial
//! distance, angle and the zoom accumulated so far. Each later two-contact
//! sample yields `scale = distance / initialDistance`, the zoom
//! `clamp(initialZoom × scale, min, max)`, `rotation = angle − initialAngle`
//! and the contact midpoint. The midpoint's movement also nudges the view pan
//! by `pan_factor` of its displacement.
//!
//! Zoom and pan are view state: they survive the end of a pinch and of the
//! session, and only [`reset_view`](PinchRecognizer::reset_view) clears them.

use crate::geometry::{Point, Vector};
use crate::gesture_event::PinchGesture;
use crate::sample::PointerSample;

/// Contacts closer than this cannot define a scale.
const MIN_INITIAL_DISTANCE: f64 = 1e-6;

/// Geometry captured when the second contact joined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchRotateState {
    pub initial_distance: f64,
    pub initial_angle: f64,
    pub initial_zoom: f64,
    last_center: Point,
}

#[derive(Debug, Clone)]
pub struct PinchRecognizer {
    min_zoom: f64,
    max_zoom: f64,
    pan_factor: f64,
    zoom: f64,
    pan: Vector,
    state: Option<PinchRotateState>,
}

impl PinchRecognizer {
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64, pan_factor: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            pan_factor,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            pan: Vector::ZERO,
            state: None,
        }
    }

    /// Capture fresh initial geometry for the pair `(a, b)`.
    pub fn begin(&mut self, a: &PointerSample, b: &PointerSample) {
        let (pa, pb) = (a.position(), b.position());
        let distance = pa.distance(pb);
        self.state = (distance > MIN_INITIAL_DISTANCE).then(|| PinchRotateState {
            initial_distance: distance,
            initial_angle: pa.angle_to(pb),
            initial_zoom: self.zoom,
            last_center: pa.midpoint(pb),
        });
    }

    /// Update with the current pair. Coincident contacts at capture time
    /// defer capture to the first sample where they separate.
    pub fn update(&mut self, a: &PointerSample, b: &PointerSample) -> Option<PinchGesture> {
        let Some(state) = self.state.as_mut() else {
            self.begin(a, b);
            return None;
        };
        let (pa, pb) = (a.position(), b.position());
        let scale = pa.distance(pb) / state.initial_distance;
        let rotation = pa.angle_to(pb) - state.initial_angle;
        let center = pa.midpoint(pb);

        self.zoom = (state.initial_zoom * scale).clamp(self.min_zoom, self.max_zoom);
        self.pan += center.delta_from(state.last_center).scale(self.pan_factor);
        state.last_center = center;

        Some(PinchGesture {
            scale,
            rotation,
            center,
            zoom: self.zoom,
            pan: self.pan,
        })
    }

    /// Leave two-contact mode; view state is kept.
    pub fn end(&mut self) {
        self.state = None;
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> Option<&PinchRotateState> {
        self.state.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    pub fn reset_view(&mut self) {
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.pan = Vector::ZERO;
        self.state = None;
    }
}
