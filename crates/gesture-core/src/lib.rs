#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Headless touch gesture recognition and momentum physics.
//!
//! # Role
//! `gesture-core` turns a stream of multi-contact touch/pointer notifications
//! into semantic gesture events: tap patterns, long-press, force-press, pan,
//! swipe, pinch/rotate, freehand circles and strokes, direction shortcuts,
//! device shake and orientation flips. It also runs the momentum glide that
//! follows a fast release.
//!
//! # Primary responsibilities
//! - **SampleNormalizer**: validates raw contacts into [`PointerSample`]s.
//! - **Classifiers** ([`gesture`]): small per-concern state machines.
//! - **MomentumSimulator**: frame-driven exponential velocity decay.
//! - **GestureDispatcher**: routes events to optional consumer handlers.
//! - **GestureEngine**: owns all of the above and the single live session.
//!
//! # How it fits in the system
//! The crate has no platform dependency. Time is whatever the host says it
//! is: every input carries a [`Duration`](std::time::Duration) timestamp and
//! the host calls [`GestureEngine::tick`] once per animation frame. Haptics,
//! sensor permissions and capability probing are injected traits, so the
//! whole pipeline is deterministic under test. `gesture-web` is the browser
//! host built on top.
//!
//! ```
//! use std::time::Duration;
//! use gesture_core::{GestureConfig, GestureEngine, GestureEvent, RawContact, TouchNotification, TouchPhase};
//!
//! let mut engine = GestureEngine::new(GestureConfig::default());
//! let ms = Duration::from_millis;
//! engine.handle(&TouchNotification::new(TouchPhase::Start, ms(0))
//!     .with_touches([RawContact::at(1, 100.0, 100.0)]));
//! engine.handle(&TouchNotification::new(TouchPhase::End, ms(60))
//!     .with_changed([RawContact::at(1, 101.0, 100.0)]));
//!
//! // The single tap is reported once the finalize debounce expires.
//! let events = engine.tick(ms(400));
//! assert!(matches!(events[..], [GestureEvent::Tap { .. }]));
//! ```

pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod event_coalescer;
pub mod geometry;
pub mod gesture;
pub mod gesture_event;
pub mod logging;
pub mod momentum;
pub mod sample;
pub mod sensor;
pub mod timer;

pub use capabilities::{Capabilities, HapticPattern, HapticSink, NoHaptics};
pub use config::{GestureConfig, MomentumConfig, ShakeConfig};
pub use dispatch::{GestureDispatcher, GestureHandlers, GestureKinds};
pub use engine::GestureEngine;
pub use error::{SampleError, SensorError, SensorKind};
pub use geometry::{Point, Vector};
pub use gesture_event::{
    CircleRegion, DrawPattern, DrawPatternKind, GestureEvent, GestureKind, LongPress, Orientation,
    PanGesture, PinchGesture, ShortcutKind, SwipeDirection, SwipeGesture, TapPatternGesture,
    TapPatternKind,
};
pub use momentum::{MomentumSimulator, MomentumState};
pub use sample::{PointerId, PointerSample, RawContact, SampleFrame, TouchNotification, TouchPhase};
pub use sensor::{
    MotionPermission, MotionSample, OrientationSample, OrientationTracker, PermissionState,
    ShakeDetector,
};
