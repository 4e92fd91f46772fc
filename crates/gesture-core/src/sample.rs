#![forbid(unsafe_code)]

//! Canonical pointer samples and the normalizer that produces them.
//!
//! Hosts describe each platform notification as a [`TouchNotification`]:
//! the lifecycle phase, a timestamp, every contact still on the surface
//! (`touches`, like DOM `TouchEvent.touches`) and the contacts the
//! notification is about (`changed`, like `changedTouches`). Coordinates are
//! optional because platform payloads can be incomplete.
//!
//! [`SampleNormalizer`] turns that into a [`SampleFrame`] of validated
//! [`PointerSample`]s. Contacts with a missing or non-finite coordinate are
//! dropped and counted; the frame itself is never rejected.

use std::time::Duration;

use crate::error::{Axis, SampleError};
use crate::geometry::Point;

/// Stable identifier of one contact across samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u32);

impl core::fmt::Display for PointerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One contact position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
    /// Monotonic host time.
    pub timestamp: Duration,
    /// Normalized force in `[0, 1]`, when the platform reports one.
    pub pressure: Option<f64>,
}

impl PointerSample {
    #[must_use]
    pub const fn new(id: u32, x: f64, y: f64, timestamp: Duration) -> Self {
        Self {
            id: PointerId(id),
            x,
            y,
            timestamp,
            pressure: None,
        }
    }

    #[must_use]
    pub const fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Lifecycle tag of a platform notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A contact as reported by the platform, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawContact {
    pub id: u32,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub pressure: Option<f64>,
}

impl RawContact {
    #[must_use]
    pub const fn at(id: u32, x: f64, y: f64) -> Self {
        Self {
            id,
            x: Some(x),
            y: Some(y),
            pressure: None,
        }
    }

    #[must_use]
    pub const fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Validate into a [`PointerSample`] stamped at `timestamp`.
    pub fn to_sample(&self, timestamp: Duration) -> Result<PointerSample, SampleError> {
        let id = PointerId(self.id);
        let x = self
            .x
            .ok_or(SampleError::MissingCoordinate { id, axis: Axis::X })?;
        let y = self
            .y
            .ok_or(SampleError::MissingCoordinate { id, axis: Axis::Y })?;
        if !x.is_finite() || !y.is_finite() {
            return Err(SampleError::NonFiniteCoordinate { id });
        }
        let pressure = match self.pressure {
            Some(p) if !p.is_finite() => return Err(SampleError::NonFinitePressure { id }),
            other => other,
        };
        Ok(PointerSample {
            id,
            x,
            y,
            timestamp,
            pressure,
        })
    }
}

/// One platform touch/pointer notification.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchNotification {
    pub phase: TouchPhase,
    pub timestamp: Duration,
    /// Contacts still active after this notification.
    pub touches: Vec<RawContact>,
    /// Contacts this notification is about (the lifted ones for `End`).
    pub changed: Vec<RawContact>,
}

impl TouchNotification {
    #[must_use]
    pub fn new(phase: TouchPhase, timestamp: Duration) -> Self {
        Self {
            phase,
            timestamp,
            touches: Vec::new(),
            changed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_touches(mut self, touches: impl IntoIterator<Item = RawContact>) -> Self {
        self.touches = touches.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_changed(mut self, changed: impl IntoIterator<Item = RawContact>) -> Self {
        self.changed = changed.into_iter().collect();
        self
    }
}

/// Canonical per-tick view of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFrame {
    pub phase: TouchPhase,
    pub timestamp: Duration,
    /// One sample per active contact, in platform order.
    pub active: Vec<PointerSample>,
    /// Samples for the contacts the notification is about.
    pub changed: Vec<PointerSample>,
    /// Active contacts whose sample was rejected. They are still down.
    pub dropped: Vec<PointerId>,
}

impl SampleFrame {
    /// Number of active contacts.
    #[inline]
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.active.len()
    }

    /// Sample for `id` among active contacts, falling back to changed ones.
    #[must_use]
    pub fn sample(&self, id: PointerId) -> Option<&PointerSample> {
        self.active
            .iter()
            .chain(self.changed.iter())
            .find(|s| s.id == id)
    }
}

/// Counters for dropped input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerStats {
    pub frames: u64,
    pub dropped_samples: u64,
}

/// Converts [`TouchNotification`]s into [`SampleFrame`]s.
#[derive(Debug, Clone, Default)]
pub struct SampleNormalizer {
    stats: NormalizerStats,
}

impl SampleNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one notification. Malformed contacts are dropped.
    pub fn normalize(&mut self, notification: &TouchNotification) -> SampleFrame {
        self.stats.frames += 1;
        let ts = notification.timestamp;
        let mut dropped = Vec::new();
        let active = self.collect(&notification.touches, ts, &mut dropped);
        let changed = self.collect(&notification.changed, ts, &mut Vec::new());
        SampleFrame {
            phase: notification.phase,
            timestamp: ts,
            active,
            changed,
            dropped,
        }
    }

    fn collect(
        &mut self,
        contacts: &[RawContact],
        ts: Duration,
        dropped: &mut Vec<PointerId>,
    ) -> Vec<PointerSample> {
        let mut out = Vec::with_capacity(contacts.len());
        for contact in contacts {
            match contact.to_sample(ts) {
                Ok(sample) => out.push(sample),
                Err(_err) => {
                    self.stats.dropped_samples += 1;
                    dropped.push(PointerId(contact.id));
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %_err, "dropped malformed contact");
                }
            }
        }
        out
    }

    #[must_use]
    pub fn stats(&self) -> NormalizerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_millis(40);

    #[test]
    fn valid_contacts_become_samples() {
        let mut n = SampleNormalizer::new();
        let frame = n.normalize(
            &TouchNotification::new(TouchPhase::Start, T)
                .with_touches([RawContact::at(1, 10.0, 20.0).with_pressure(0.3)]),
        );
        assert_eq!(frame.contact_count(), 1);
        let s = frame.active[0];
        assert_eq!(s.id, PointerId(1));
        assert_eq!(s.position(), Point::new(10.0, 20.0));
        assert_eq!(s.timestamp, T);
        assert_eq!(s.pressure, Some(0.3));
    }

    #[test]
    fn missing_coordinate_is_dropped_not_fatal() {
        let mut n = SampleNormalizer::new();
        let broken = RawContact {
            id: 2,
            x: Some(5.0),
            y: None,
            pressure: None,
        };
        let frame = n.normalize(
            &TouchNotification::new(TouchPhase::Move, T)
                .with_touches([RawContact::at(1, 0.0, 0.0), broken]),
        );
        assert_eq!(frame.contact_count(), 1);
        assert_eq!(frame.active[0].id, PointerId(1));
        assert_eq!(frame.dropped, vec![PointerId(2)]);
        assert_eq!(n.stats().dropped_samples, 1);
        assert_eq!(n.stats().frames, 1);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let nan = RawContact::at(3, f64::NAN, 1.0);
        assert_eq!(
            nan.to_sample(T),
            Err(SampleError::NonFiniteCoordinate { id: PointerId(3) })
        );
        let bad_force = RawContact::at(3, 1.0, 1.0).with_pressure(f64::INFINITY);
        assert_eq!(
            bad_force.to_sample(T),
            Err(SampleError::NonFinitePressure { id: PointerId(3) })
        );
    }

    #[test]
    fn frame_lookup_prefers_active() {
        let mut n = SampleNormalizer::new();
        let frame = n.normalize(
            &TouchNotification::new(TouchPhase::End, T)
                .with_touches([RawContact::at(1, 1.0, 1.0)])
                .with_changed([RawContact::at(2, 9.0, 9.0)]),
        );
        assert_eq!(frame.sample(PointerId(1)).map(|s| s.x), Some(1.0));
        assert_eq!(frame.sample(PointerId(2)).map(|s| s.x), Some(9.0));
        assert!(frame.sample(PointerId(3)).is_none());
    }
}
