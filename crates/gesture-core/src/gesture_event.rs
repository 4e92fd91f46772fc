#![forbid(unsafe_code)]

//! Classified gesture events.
//!
//! [`GestureEvent`] represents what the user *meant* rather than where their
//! fingers were. The engine produces these from normalized samples; consumers
//! receive them through the handler set or as the return value of
//! [`GestureEngine::handle`](crate::engine::GestureEngine::handle).
//!
//! # Invariants
//! 1. `PinchGesture::zoom` always lies within the configured zoom bounds.
//! 2. `TapPatternGesture::taps >= 2`; single taps are reported as `Tap`.
//! 3. `DrawPattern` events never carry `DrawPatternKind::Unknown`.
//! 4. Momentum-driven `Pan` events have `is_momentum == true` and never follow
//!    a `SessionStart` until the next release.
//! 5. Every `SessionStart` is matched by exactly one `SessionEnd`.

use std::time::Duration;

use crate::geometry::{Point, Vector};

// ---------------------------------------------------------------------------
// Directions and kinds
// ---------------------------------------------------------------------------

/// Cardinal direction for swipe gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of the dominant axis of `delta`. Ties go vertical.
    #[must_use]
    pub fn from_delta(delta: Vector) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { Self::Right } else { Self::Left }
        } else if delta.y > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Reaction bucket for a multi-tap pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TapPatternKind {
    QuickLike,
    Love,
    Fire,
    /// Five taps or more; the raw count travels in the payload.
    Poggers,
}

impl TapPatternKind {
    /// Map a finalized tap count to its bucket. `None` below two taps.
    #[must_use]
    pub const fn from_count(taps: usize) -> Option<Self> {
        match taps {
            0 | 1 => None,
            2 => Some(Self::QuickLike),
            3 => Some(Self::Love),
            4 => Some(Self::Fire),
            _ => Some(Self::Poggers),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuickLike => "quick_like",
            Self::Love => "love",
            Self::Fire => "fire",
            Self::Poggers => "poggers",
        }
    }
}

/// Shape recognized from a freehand path on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DrawPatternKind {
    Checkmark,
    X,
    Unknown,
}

/// Power-user direction sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortcutKind {
    /// Down then right.
    LShape,
    /// Up, down, up, down.
    Zigzag,
    /// Up, right, left.
    Triangle,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanGesture {
    /// Movement since the previously processed sample (or momentum tick).
    pub delta_x: f64,
    pub delta_y: f64,
    /// Cumulative movement since contact-down.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Per-tick velocity, clamped to the momentum velocity cap.
    pub velocity: Vector,
    pub is_momentum: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinchGesture {
    /// Raw `currentDistance / initialDistance`.
    pub scale: f64,
    /// `currentAngle - initialAngle`, radians.
    pub rotation: f64,
    /// Midpoint of the two contacts.
    pub center: Point,
    /// Accumulated zoom after applying `scale`, clamped.
    pub zoom: f64,
    /// Accumulated view pan from two-contact center movement.
    pub pan: Vector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeGesture {
    pub direction: SwipeDirection,
    /// Euclidean displacement from contact-down to release.
    pub distance: f64,
    /// Displacement per millisecond.
    pub velocity: Vector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TapPatternGesture {
    pub kind: TapPatternKind,
    pub taps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawPattern {
    pub kind: DrawPatternKind,
    pub confidence: f64,
}

impl DrawPattern {
    pub const UNKNOWN: Self = Self {
        kind: DrawPatternKind::Unknown,
        confidence: 0.0,
    };
}

/// Region enclosed by a recognized circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircleRegion {
    pub center: Point,
    /// Mean distance of the path from its centroid.
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongPress {
    pub position: Point,
    pub held: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Screen rotation in degrees (0, ±90, 180).
    pub screen_angle: i32,
    pub is_portrait: bool,
}

// ---------------------------------------------------------------------------
// GestureEvent
// ---------------------------------------------------------------------------

/// Every outcome the engine can classify.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum GestureEvent {
    SessionStart { contacts: usize },
    /// Last contact lifted or the session was cancelled.
    SessionEnd { max_contacts: usize, cancelled: bool },
    Pan(PanGesture),
    Pinch(PinchGesture),
    Swipe(SwipeGesture),
    Tap { position: Point },
    TapPattern(TapPatternGesture),
    LongPress(LongPress),
    ForcePress { force: f64 },
    Circle(CircleRegion),
    DrawPattern(DrawPattern),
    Shortcut { kind: ShortcutKind },
    Shake,
    Orientation(Orientation),
}

impl GestureEvent {
    /// The kind tag, used for routing.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::SessionStart { .. } => GestureKind::SessionStart,
            Self::SessionEnd { .. } => GestureKind::SessionEnd,
            Self::Pan(_) => GestureKind::Pan,
            Self::Pinch(_) => GestureKind::Pinch,
            Self::Swipe(_) => GestureKind::Swipe,
            Self::Tap { .. } => GestureKind::Tap,
            Self::TapPattern(_) => GestureKind::TapPattern,
            Self::LongPress(_) => GestureKind::LongPress,
            Self::ForcePress { .. } => GestureKind::ForcePress,
            Self::Circle(_) => GestureKind::Circle,
            Self::DrawPattern(_) => GestureKind::DrawPattern,
            Self::Shortcut { .. } => GestureKind::Shortcut,
            Self::Shake => GestureKind::Shake,
            Self::Orientation(_) => GestureKind::Orientation,
        }
    }

    /// True for momentum-driven pans.
    #[must_use]
    pub fn is_momentum(&self) -> bool {
        matches!(self, Self::Pan(pan) if pan.is_momentum)
    }
}

/// Fieldless discriminant of [`GestureEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    SessionStart,
    SessionEnd,
    Pan,
    Pinch,
    Swipe,
    Tap,
    TapPattern,
    LongPress,
    ForcePress,
    Circle,
    DrawPattern,
    Shortcut,
    Shake,
    Orientation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_direction_dominant_axis() {
        assert_eq!(
            SwipeDirection::from_delta(Vector::new(80.0, 10.0)),
            SwipeDirection::Right
        );
        assert_eq!(
            SwipeDirection::from_delta(Vector::new(-80.0, 79.0)),
            SwipeDirection::Left
        );
        assert_eq!(
            SwipeDirection::from_delta(Vector::new(5.0, 60.0)),
            SwipeDirection::Down
        );
        assert_eq!(
            SwipeDirection::from_delta(Vector::new(5.0, -60.0)),
            SwipeDirection::Up
        );
        // Equal magnitudes resolve vertically.
        assert_eq!(
            SwipeDirection::from_delta(Vector::new(60.0, 60.0)),
            SwipeDirection::Down
        );
    }

    #[test]
    fn opposite_directions() {
        assert_eq!(SwipeDirection::Up.opposite(), SwipeDirection::Down);
        assert_eq!(SwipeDirection::Left.opposite(), SwipeDirection::Right);
        assert!(SwipeDirection::Up.is_vertical());
        assert!(!SwipeDirection::Right.is_vertical());
    }

    #[test]
    fn tap_count_buckets() {
        assert_eq!(TapPatternKind::from_count(1), None);
        assert_eq!(TapPatternKind::from_count(2), Some(TapPatternKind::QuickLike));
        assert_eq!(TapPatternKind::from_count(3), Some(TapPatternKind::Love));
        assert_eq!(TapPatternKind::from_count(4), Some(TapPatternKind::Fire));
        assert_eq!(TapPatternKind::from_count(5), Some(TapPatternKind::Poggers));
        assert_eq!(TapPatternKind::from_count(50), Some(TapPatternKind::Poggers));
        assert_eq!(TapPatternKind::Love.as_str(), "love");
    }

    #[test]
    fn kind_and_momentum_flag() {
        let pan = GestureEvent::Pan(PanGesture {
            delta_x: 1.0,
            delta_y: 0.0,
            offset_x: 1.0,
            offset_y: 0.0,
            velocity: Vector::new(1.0, 0.0),
            is_momentum: true,
        });
        assert_eq!(pan.kind(), GestureKind::Pan);
        assert!(pan.is_momentum());
        assert!(!GestureEvent::Shake.is_momentum());
        assert_eq!(GestureEvent::Shake.kind(), GestureKind::Shake);
    }
}
