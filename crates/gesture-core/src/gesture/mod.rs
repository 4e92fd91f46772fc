#![forbid(unsafe_code)]

//! Gesture classifiers.
//!
//! Each classifier is a small state machine that owns its private state and
//! is fed normalized samples by the engine:
//!
//! - [`tap`]: tap-pattern counter (rolling window + finalize debounce).
//! - [`long_press`]: stationary hold timer, cancelled by movement or release.
//! - [`force`]: pressure threshold crossing with hysteresis.
//! - [`swipe`]: quick flick classified on release.
//! - [`pan`]: single-contact movement and per-tick velocity.
//! - [`pinch`]: two-contact scale, rotation, center and view zoom/pan.
//! - [`freehand`]: path buffer, circle detection, checkmark/X analysis.
//! - [`shortcut`]: swipe-direction sequences.
//!
//! [`session::GestureSession`] groups the classifiers whose state must not
//! outlive one contact lifetime.
//!
//! # Invariants
//!
//! 1. A session that ever had two contacts produces no tap, long-press,
//!    swipe, freehand or momentum outcome.
//! 2. A contact that fired long-press produces no tap, swipe or draw pattern
//!    on release.
//! 3. A release that classifies as a swipe is not also analyzed as a
//!    checkmark/X stroke.
//! 4. Timers are polled before the input that carries a later timestamp is
//!    processed, so an overdue timer fires in order and a cancelled one never
//!    fires.

pub mod force;
pub mod freehand;
pub mod long_press;
pub mod pan;
pub mod pinch;
pub mod session;
pub mod shortcut;
pub mod swipe;
pub mod tap;

pub use force::ForcePressDetector;
pub use freehand::{PathBuffer, analyze_draw_pattern, detect_circle};
pub use long_press::LongPressDetector;
pub use pan::PanTracker;
pub use pinch::{PinchRecognizer, PinchRotateState};
pub use session::GestureSession;
pub use shortcut::{ShortcutRecognizer, match_shortcut};
pub use swipe::SwipeDetector;
pub use tap::TapPatternCounter;
