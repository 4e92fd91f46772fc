#![forbid(unsafe_code)]

//! Freehand shape recognition.
//!
//! A [`PathBuffer`] accumulates the positions of one continuous contact.
//!
//! - **Circle**: once the path holds at least `circle_min_points`, the
//!   distances of every point to the centroid are computed; the path is a
//!   circle when the variance of those distances is below
//!   `variance_ratio × mean distance`. The comparison mixes px² and px; the
//!   thresholds were tuned against that formula and are not density-scaled.
//! - **Checkmark / X**: on release, the start, middle and end points decide.
//!   A checkmark dips below the start at the middle, comes back up at the end
//!   and finishes to the right of the start. An X-stroke displaces more than
//!   `displacement` px on both axes.
//!
//! The buffer is cleared after any classification and when the contact ends.

use std::collections::VecDeque;

use crate::geometry::{Point, centroid};
use crate::gesture_event::{CircleRegion, DrawPattern, DrawPatternKind};

/// Upper bound on buffered points; the oldest are dropped beyond it.
pub const PATH_CAPACITY: usize = 256;

const CHECKMARK_CONFIDENCE: f64 = 0.8;
const X_CONFIDENCE: f64 = 0.7;

/// Ordered positions of one continuous contact.
#[derive(Debug, Clone, Default)]
pub struct PathBuffer {
    points: VecDeque<Point>,
}

impl PathBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(64),
        }
    }

    pub fn push(&mut self, point: Point) {
        if self.points.len() == PATH_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Contiguous view of the path.
    #[must_use]
    pub fn points(&mut self) -> &[Point] {
        self.points.make_contiguous()
    }
}

/// Classify `path` as a circle. `None` below `min_points` or if the
/// distance spread is too wide.
#[must_use]
pub fn detect_circle(path: &[Point], min_points: usize, variance_ratio: f64) -> Option<CircleRegion> {
    if path.len() < min_points.max(1) {
        return None;
    }
    let center = centroid(path.iter().copied())?;
    let n = path.len() as f64;
    let distances: Vec<f64> = path.iter().map(|p| p.distance(center)).collect();
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    (variance < mean * variance_ratio).then_some(CircleRegion {
        center,
        radius: mean,
    })
}

/// Classify a released path as a checkmark or X-stroke.
#[must_use]
pub fn analyze_draw_pattern(path: &[Point], displacement: f64) -> DrawPattern {
    let (Some(&start), Some(&end)) = (path.first(), path.last()) else {
        return DrawPattern::UNKNOWN;
    };
    let middle = path[path.len() / 2];

    if middle.y > start.y && end.y < middle.y && end.x > start.x {
        return DrawPattern {
            kind: DrawPatternKind::Checkmark,
            confidence: CHECKMARK_CONFIDENCE,
        };
    }
    if (end.x - start.x).abs() > displacement && (end.y - start.y).abs() > displacement {
        return DrawPattern {
            kind: DrawPatternKind::X,
            confidence: X_CONFIDENCE,
        };
    }
    DrawPattern::UNKNOWN
}
