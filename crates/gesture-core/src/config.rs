#![forbid(unsafe_code)]

//! Thresholds, timeouts and physics constants.
//!
//! Every field has a default matching the values the site ships with. Hosts
//! that need the slower "deliberate" interaction style (card previews, bracket
//! slots) start from [`GestureConfig::deliberate`].
//!
//! With the `serde` feature, all config structs deserialize from partial
//! documents; durations are encoded as integer milliseconds.

use std::time::Duration;

/// Momentum scrolling physics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MomentumConfig {
    /// Per-tick velocity multiplier (default: 0.95).
    pub friction: f64,
    /// Per-axis velocity cap in px/tick applied at capture time (default: 50).
    pub max_velocity: f64,
    /// Axis magnitude in px/tick below which motion stops (default: 5).
    pub stop_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            friction: 0.95,
            max_velocity: 50.0,
            stop_threshold: 5.0,
        }
    }
}

/// Device shake detection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShakeConfig {
    /// Summed per-axis acceleration delta (m/s²) that counts as a shake (default: 15).
    pub sensitivity: f64,
    /// Quiet period after a shake during which no further shake fires (default: 1000ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub cooldown: Duration,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            sensitivity: 15.0,
            cooldown: Duration::from_millis(1000),
        }
    }
}

/// Thresholds and timeouts for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Hold duration before a stationary contact fires long-press (default: 500ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub long_press_delay: Duration,
    /// Movement (px) under which a contact is still stationary (default: 10).
    pub jitter_threshold: f64,
    /// Pressure at or above which force-press fires (default: 0.5).
    pub force_threshold: f64,
    /// Longest contact that can still be a swipe (default: 300ms, exclusive).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub swipe_max_duration: Duration,
    /// Shortest displacement (px) that counts as a swipe (default: 50, inclusive).
    pub swipe_min_distance: f64,
    /// Rolling window that taps aggregate within (default: 1000ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub tap_window: Duration,
    /// Debounce after the last tap before the pattern is finalized (default: 300ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub tap_finalize_delay: Duration,
    /// Lower zoom bound (default: 0.5).
    pub min_zoom: f64,
    /// Upper zoom bound (default: 3.0).
    pub max_zoom: f64,
    /// Share of the two-contact center movement applied to the view pan (default: 0.1).
    pub pinch_pan_factor: f64,
    /// Points required before circle detection runs (default: 10).
    pub circle_min_points: usize,
    /// Circle accepted when distance variance < ratio × mean distance (default: 0.3).
    pub circle_variance_ratio: f64,
    /// Points required before checkmark/X analysis runs on release (default: 4).
    pub draw_min_points: usize,
    /// Displacement (px) both axes must exceed for an X (default: 50).
    pub draw_displacement: f64,
    /// Move throttle interval; zero processes every move (default: 16.7ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub frame_interval: Duration,
    /// Debounce after the last swipe before a direction shortcut is matched (default: 500ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub shortcut_timeout: Duration,
    pub momentum: MomentumConfig,
    pub shake: ShakeConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_delay: Duration::from_millis(500),
            jitter_threshold: 10.0,
            force_threshold: 0.5,
            swipe_max_duration: Duration::from_millis(300),
            swipe_min_distance: 50.0,
            tap_window: Duration::from_millis(1000),
            tap_finalize_delay: Duration::from_millis(300),
            min_zoom: 0.5,
            max_zoom: 3.0,
            pinch_pan_factor: 0.1,
            circle_min_points: 10,
            circle_variance_ratio: 0.3,
            draw_min_points: 4,
            draw_displacement: 50.0,
            frame_interval: Duration::from_micros(16_700),
            shortcut_timeout: Duration::from_millis(500),
            momentum: MomentumConfig::default(),
            shake: ShakeConfig::default(),
        }
    }
}

impl GestureConfig {
    /// Slower long-press (800ms) and a firmer force threshold (0.75).
    #[must_use]
    pub fn deliberate() -> Self {
        Self::default()
            .with_long_press_delay(Duration::from_millis(800))
            .with_force_threshold(0.75)
    }

    #[must_use]
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay = delay;
        self
    }

    #[must_use]
    pub fn with_jitter_threshold(mut self, px: f64) -> Self {
        self.jitter_threshold = px.max(0.0);
        self
    }

    #[must_use]
    pub fn with_force_threshold(mut self, threshold: f64) -> Self {
        self.force_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Zoom bounds; swapped if given in the wrong order.
    #[must_use]
    pub fn with_zoom_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min.min(max);
        self.max_zoom = max.max(min);
        self
    }

    #[must_use]
    pub fn with_momentum(mut self, momentum: MomentumConfig) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn with_shake(mut self, shake: ShakeConfig) -> Self {
        self.shake = shake;
        self
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        // Accept fractional milliseconds (the frame interval is 16.7ms).
        let ms = f64::deserialize(d)?;
        if !ms.is_finite() || ms < 0.0 {
            return Err(serde::de::Error::custom("duration must be a non-negative number of ms"));
        }
        Ok(Duration::from_secs_f64(ms / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = GestureConfig::default();
        assert_eq!(config.long_press_delay, Duration::from_millis(500));
        assert_eq!(config.force_threshold, 0.5);
        assert_eq!(config.swipe_max_duration, Duration::from_millis(300));
        assert_eq!(config.swipe_min_distance, 50.0);
        assert_eq!(config.tap_window, Duration::from_millis(1000));
        assert_eq!(config.tap_finalize_delay, Duration::from_millis(300));
        assert_eq!((config.min_zoom, config.max_zoom), (0.5, 3.0));
        assert_eq!(config.circle_min_points, 10);
        assert_eq!(config.momentum.friction, 0.95);
        assert_eq!(config.momentum.max_velocity, 50.0);
        assert_eq!(config.momentum.stop_threshold, 5.0);
        assert_eq!(config.shake.sensitivity, 15.0);
    }

    #[test]
    fn deliberate_preset() {
        let config = GestureConfig::deliberate();
        assert_eq!(config.long_press_delay, Duration::from_millis(800));
        assert_eq!(config.force_threshold, 0.75);
        assert_eq!(config.jitter_threshold, 10.0);
    }

    #[test]
    fn zoom_bounds_are_ordered() {
        let config = GestureConfig::default().with_zoom_bounds(4.0, 0.25);
        assert_eq!((config.min_zoom, config.max_zoom), (0.25, 4.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: GestureConfig =
            serde_json::from_str(r#"{"long_press_delay": 800, "momentum": {"friction": 0.9}}"#)
                .unwrap();
        assert_eq!(config.long_press_delay, Duration::from_millis(800));
        assert_eq!(config.momentum.friction, 0.9);
        assert_eq!(config.momentum.max_velocity, 50.0);
        assert_eq!(config.tap_window, Duration::from_millis(1000));
    }
}
