#![forbid(unsafe_code)]

//! Ambient sensor detectors: device shake and screen orientation.
//!
//! Both run over a periodic sample stream the host forwards from
//! `devicemotion` / `deviceorientation`. Access goes through a
//! [`MotionPermission`] provider; if the platform lacks the sensor or the
//! user refuses the permission prompt, the detector is built disabled and
//! silently ignores every sample.

use std::time::Duration;

use crate::config::ShakeConfig;
use crate::error::{SensorError, SensorKind};
use crate::gesture_event::{GestureEvent, Orientation};

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The platform does not gate this sensor behind a prompt.
    NotRequired,
}

/// Sensor availability and permission provider.
pub trait MotionPermission {
    /// Whether the device has the sensor.
    fn is_supported(&self, kind: SensorKind) -> bool;

    /// Ask for access. May show a prompt on platforms that gate sensors.
    fn request(&mut self, kind: SensorKind) -> PermissionState;
}

/// Provider for hosts where sensors need no prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGranted;

impl MotionPermission for AlwaysGranted {
    fn is_supported(&self, _kind: SensorKind) -> bool {
        true
    }

    fn request(&mut self, _kind: SensorKind) -> PermissionState {
        PermissionState::NotRequired
    }
}

/// Provider for hosts without sensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensors;

impl MotionPermission for NoSensors {
    fn is_supported(&self, _kind: SensorKind) -> bool {
        false
    }

    fn request(&mut self, _kind: SensorKind) -> PermissionState {
        PermissionState::Denied
    }
}

fn acquire(permission: &mut dyn MotionPermission, kind: SensorKind) -> Result<(), SensorError> {
    if !permission.is_supported(kind) {
        return Err(SensorError::Unsupported(kind));
    }
    match permission.request(kind) {
        PermissionState::Granted | PermissionState::NotRequired => Ok(()),
        PermissionState::Denied => Err(SensorError::PermissionDenied(kind)),
    }
}

fn log_disabled(_err: &SensorError) {
    #[cfg(feature = "tracing")]
    tracing::info!(error = %_err, "ambient detector disabled");
}

// ---------------------------------------------------------------------------
// Shake
// ---------------------------------------------------------------------------

/// One accelerometer reading including gravity (m/s²).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub timestamp: Duration,
}

impl MotionSample {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, timestamp: Duration) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            timestamp,
        }
    }

    fn axes(&self) -> Option<[f64; 3]> {
        let axes = [self.x?, self.y?, self.z?];
        axes.iter().all(|v| v.is_finite()).then_some(axes)
    }
}

/// Fires [`GestureEvent::Shake`] on sudden acceleration changes.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    enabled: bool,
    config: ShakeConfig,
    baseline: Option<[f64; 3]>,
    quiet_until: Option<Duration>,
}

impl ShakeDetector {
    /// Build an enabled detector or report why it cannot be.
    pub fn try_new(
        config: ShakeConfig,
        permission: &mut dyn MotionPermission,
    ) -> Result<Self, SensorError> {
        acquire(permission, SensorKind::Motion)?;
        Ok(Self::with_state(config, true))
    }

    /// Build a detector, disabled if the sensor is unavailable.
    #[must_use]
    pub fn new(config: ShakeConfig, permission: &mut dyn MotionPermission) -> Self {
        Self::try_new(config, permission).unwrap_or_else(|err| {
            log_disabled(&err);
            Self::disabled(config)
        })
    }

    /// A detector that never fires.
    #[must_use]
    pub fn disabled(config: ShakeConfig) -> Self {
        Self::with_state(config, false)
    }

    fn with_state(config: ShakeConfig, enabled: bool) -> Self {
        Self {
            enabled,
            config,
            baseline: None,
            quiet_until: None,
        }
    }

    /// Feed one reading. The first valid reading only primes the baseline.
    pub fn on_motion(&mut self, sample: &MotionSample) -> Option<GestureEvent> {
        if !self.enabled {
            return None;
        }
        let axes = sample.axes()?;
        let previous = self.baseline.replace(axes)?;
        let change: f64 = axes
            .iter()
            .zip(previous.iter())
            .map(|(now, before)| (now - before).abs())
            .sum();
        if change <= self.config.sensitivity {
            return None;
        }
        if self.quiet_until.is_some_and(|until| sample.timestamp < until) {
            return None;
        }
        self.quiet_until = Some(sample.timestamp.saturating_add(self.config.cooldown));
        Some(GestureEvent::Shake)
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// One orientation reading. Missing angles read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientationSample {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    /// Screen rotation in degrees.
    pub screen_angle: i32,
}

/// Tracks device orientation and reports portrait/landscape flips.
#[derive(Debug, Clone)]
pub struct OrientationTracker {
    enabled: bool,
    current: Option<Orientation>,
}

impl OrientationTracker {
    pub fn try_new(permission: &mut dyn MotionPermission) -> Result<Self, SensorError> {
        acquire(permission, SensorKind::Orientation)?;
        Ok(Self {
            enabled: true,
            current: None,
        })
    }

    #[must_use]
    pub fn new(permission: &mut dyn MotionPermission) -> Self {
        Self::try_new(permission).unwrap_or_else(|err| {
            log_disabled(&err);
            Self::disabled()
        })
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            current: None,
        }
    }

    /// Record a reading; emits when the portrait/landscape state flips (or
    /// on the first reading).
    pub fn on_orientation(&mut self, sample: &OrientationSample) -> Option<GestureEvent> {
        if !self.enabled {
            return None;
        }
        let finite_or_zero = |v: Option<f64>| v.filter(|a| a.is_finite()).unwrap_or(0.0);
        let next = Orientation {
            alpha: finite_or_zero(sample.alpha),
            beta: finite_or_zero(sample.beta),
            gamma: finite_or_zero(sample.gamma),
            screen_angle: sample.screen_angle,
            is_portrait: sample.screen_angle.unsigned_abs() != 90,
        };
        let flipped = self
            .current
            .is_none_or(|prev| prev.is_portrait != next.is_portrait);
        self.current = Some(next);
        flipped.then_some(GestureEvent::Orientation(next))
    }

    /// Latest reading.
    #[must_use]
    pub fn current(&self) -> Option<Orientation> {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    struct Denying;

    impl MotionPermission for Denying {
        fn is_supported(&self, _kind: SensorKind) -> bool {
            true
        }

        fn request(&mut self, _kind: SensorKind) -> PermissionState {
            PermissionState::Denied
        }
    }

    #[test]
    fn first_reading_only_primes() {
        let mut d = ShakeDetector::new(ShakeConfig::default(), &mut AlwaysGranted);
        assert!(d.on_motion(&MotionSample::new(0.0, 0.0, 9.8, ms(0))).is_none());
    }

    #[test]
    fn sudden_change_is_shake() {
        let mut d = ShakeDetector::new(ShakeConfig::default(), &mut AlwaysGranted);
        d.on_motion(&MotionSample::new(0.0, 0.0, 9.8, ms(0)));
        assert!(d.on_motion(&MotionSample::new(1.0, 1.0, 9.8, ms(16))).is_none());
        assert_eq!(
            d.on_motion(&MotionSample::new(12.0, -4.0, 9.8, ms(32))),
            Some(GestureEvent::Shake)
        );
    }

    #[test]
    fn cooldown_suppresses_repeats() {
        let mut d = ShakeDetector::new(ShakeConfig::default(), &mut AlwaysGranted);
        d.on_motion(&MotionSample::new(0.0, 0.0, 0.0, ms(0)));
        assert!(d.on_motion(&MotionSample::new(20.0, 0.0, 0.0, ms(100))).is_some());
        assert!(d.on_motion(&MotionSample::new(-20.0, 0.0, 0.0, ms(200))).is_none());
        assert!(d.on_motion(&MotionSample::new(20.0, 0.0, 0.0, ms(1100))).is_some());
    }

    #[test]
    fn incomplete_reading_is_dropped() {
        let mut d = ShakeDetector::new(ShakeConfig::default(), &mut AlwaysGranted);
        d.on_motion(&MotionSample::new(0.0, 0.0, 0.0, ms(0)));
        let partial = MotionSample {
            x: Some(50.0),
            y: None,
            z: Some(0.0),
            timestamp: ms(10),
        };
        assert!(d.on_motion(&partial).is_none());
        // Baseline untouched: a real change still registers.
        assert!(d.on_motion(&MotionSample::new(20.0, 0.0, 0.0, ms(20))).is_some());
    }

    #[test]
    fn denied_permission_disables() {
        assert_eq!(
            ShakeDetector::try_new(ShakeConfig::default(), &mut Denying).err(),
            Some(SensorError::PermissionDenied(SensorKind::Motion))
        );
        let mut d = ShakeDetector::new(ShakeConfig::default(), &mut Denying);
        assert!(!d.is_enabled());
        d.on_motion(&MotionSample::new(0.0, 0.0, 0.0, ms(0)));
        assert!(d.on_motion(&MotionSample::new(90.0, 90.0, 90.0, ms(50))).is_none());
    }

    #[test]
    fn unsupported_sensor_disables() {
        assert_eq!(
            OrientationTracker::try_new(&mut NoSensors).err(),
            Some(SensorError::Unsupported(SensorKind::Orientation))
        );
        let mut t = OrientationTracker::new(&mut NoSensors);
        assert!(t.on_orientation(&OrientationSample::default()).is_none());
    }

    #[test]
    fn orientation_reports_flips_only() {
        let mut t = OrientationTracker::new(&mut AlwaysGranted);
        let portrait = OrientationSample {
            alpha: Some(10.0),
            beta: Some(45.0),
            gamma: None,
            screen_angle: 0,
        };
        match t.on_orientation(&portrait) {
            Some(GestureEvent::Orientation(o)) => {
                assert!(o.is_portrait);
                assert_eq!(o.gamma, 0.0);
            }
            other => panic!("expected orientation, got {other:?}"),
        }
        assert!(t.on_orientation(&portrait).is_none());
        let landscape = OrientationSample {
            screen_angle: -90,
            ..portrait
        };
        match t.on_orientation(&landscape) {
            Some(GestureEvent::Orientation(o)) => assert!(!o.is_portrait),
            other => panic!("expected orientation, got {other:?}"),
        }
        assert_eq!(t.current().map(|o| o.screen_angle), Some(-90));
    }
}
