#![forbid(unsafe_code)]

//! Platform capability flags and the haptic feedback sink.
//!
//! The classification logic has no platform dependency. Whatever the host
//! knows about the device is handed over at construction:
//!
//! - [`Capabilities`] gates classifiers that need hardware support (a device
//!   without pressure reporting never emits force-press).
//! - [`HapticSink`] receives fire-and-forget vibration requests.

use bitflags::bitflags;

bitflags! {
    /// Hardware features the host detected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Touches report a meaningful pressure/force value.
        const PRESSURE = 0b0001;
        /// Accelerometer events are available.
        const DEVICE_MOTION = 0b0010;
        /// Orientation (alpha/beta/gamma) events are available.
        const DEVICE_ORIENTATION = 0b0100;
        /// The vibration API is available.
        const VIBRATION = 0b1000;
    }
}

impl Default for Capabilities {
    /// Reported pressure is trusted; sensors and vibration must be declared.
    fn default() -> Self {
        Self::PRESSURE
    }
}

/// Named vibration sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticPattern {
    Light,
    Medium,
    Heavy,
    Success,
    Error,
    Reaction,
    Streak,
    Achievement,
    Unlock,
    PowerUser,
    SwipeAction,
}

impl HapticPattern {
    /// Alternating on/off durations in milliseconds, starting with "on".
    #[must_use]
    pub const fn vibration(self) -> &'static [u32] {
        match self {
            Self::Light => &[10],
            Self::Medium => &[20],
            Self::Heavy => &[30, 10, 30],
            Self::Success => &[10, 10, 10],
            Self::Error => &[50, 20, 50, 20, 50],
            Self::Reaction => &[25],
            Self::Streak => &[75, 25, 75, 25, 75],
            Self::Achievement => &[100, 50, 100, 50, 200],
            Self::Unlock => &[150, 75, 150],
            Self::PowerUser => &[25, 10, 25, 10, 25, 10, 100],
            Self::SwipeAction => &[30],
        }
    }
}

/// Fire-and-forget haptic output.
pub trait HapticSink {
    /// Whether the device can vibrate at all.
    fn is_supported(&self) -> bool;

    /// Play `pattern`. Must not block.
    fn notify(&mut self, pattern: HapticPattern);
}

/// Sink for hosts without haptics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn is_supported(&self) -> bool {
        false
    }

    fn notify(&mut self, _pattern: HapticPattern) {}
}
