#![forbid(unsafe_code)]

//! Swipe detector: a quick, long-enough flick classified on release.

use std::time::Duration;

use crate::gesture_event::{SwipeDirection, SwipeGesture};
use crate::sample::PointerSample;

#[derive(Debug, Clone)]
pub struct SwipeDetector {
    max_duration: Duration,
    min_distance: f64,
    start: Option<PointerSample>,
}

impl SwipeDetector {
    #[must_use]
    pub fn new(max_duration: Duration, min_distance: f64) -> Self {
        Self {
            max_duration,
            min_distance,
            start: None,
        }
    }

    pub fn begin(&mut self, sample: &PointerSample) {
        self.start = Some(*sample);
    }

    /// Classify the release. Both gates must pass: elapsed time strictly
    /// below the maximum and displacement at or above the minimum.
    pub fn classify(&mut self, end: &PointerSample) -> Option<SwipeGesture> {
        let start = self.start.take()?;
        let elapsed = end.timestamp.saturating_sub(start.timestamp);
        if elapsed >= self.max_duration {
            return None;
        }
        let delta = end.position().delta_from(start.position());
        let distance = delta.length();
        if distance < self.min_distance {
            return None;
        }
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        Some(SwipeGesture {
            direction: SwipeDirection::from_delta(delta),
            distance,
            velocity: delta.per(elapsed_ms),
        })
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}
