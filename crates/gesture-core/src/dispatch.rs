#![forbid(unsafe_code)]

//! Handler registration and routing.
//!
//! Consumers register only the callbacks they care about. Whatever is left
//! unregistered is a capability the consumer does not have; events of that
//! kind are still returned from the engine but are not delivered anywhere.
//!
//! ```
//! use gesture_core::dispatch::{GestureDispatcher, GestureHandlers, GestureKinds};
//! use gesture_core::gesture_event::GestureEvent;
//!
//! let handlers = GestureHandlers::new().on_shake(|| println!("shaken"));
//! assert_eq!(handlers.registered(), GestureKinds::SHAKE);
//!
//! let mut dispatcher = GestureDispatcher::new(handlers);
//! assert!(dispatcher.dispatch(&GestureEvent::Shake));
//! assert!(!dispatcher.dispatch(&GestureEvent::SessionStart { contacts: 1 }));
//! ```

use core::fmt;

use bitflags::bitflags;

use crate::geometry::Point;
use crate::gesture_event::{
    CircleRegion, DrawPattern, GestureEvent, GestureKind, LongPress, Orientation, PanGesture,
    PinchGesture, ShortcutKind, SwipeGesture, TapPatternGesture,
};

type Handler<T> = Option<Box<dyn FnMut(T)>>;

bitflags! {
    /// Set of event kinds with a registered handler.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GestureKinds: u16 {
        const SESSION_START = 1 << 0;
        const SESSION_END   = 1 << 1;
        const PAN           = 1 << 2;
        const PINCH         = 1 << 3;
        const SWIPE         = 1 << 4;
        const TAP           = 1 << 5;
        const TAP_PATTERN   = 1 << 6;
        const LONG_PRESS    = 1 << 7;
        const FORCE_PRESS   = 1 << 8;
        const CIRCLE        = 1 << 9;
        const DRAW_PATTERN  = 1 << 10;
        const SHORTCUT      = 1 << 11;
        const SHAKE         = 1 << 12;
        const ORIENTATION   = 1 << 13;
    }
}

impl From<GestureKind> for GestureKinds {
    fn from(kind: GestureKind) -> Self {
        match kind {
            GestureKind::SessionStart => Self::SESSION_START,
            GestureKind::SessionEnd => Self::SESSION_END,
            GestureKind::Pan => Self::PAN,
            GestureKind::Pinch => Self::PINCH,
            GestureKind::Swipe => Self::SWIPE,
            GestureKind::Tap => Self::TAP,
            GestureKind::TapPattern => Self::TAP_PATTERN,
            GestureKind::LongPress => Self::LONG_PRESS,
            GestureKind::ForcePress => Self::FORCE_PRESS,
            GestureKind::Circle => Self::CIRCLE,
            GestureKind::DrawPattern => Self::DRAW_PATTERN,
            GestureKind::Shortcut => Self::SHORTCUT,
            GestureKind::Shake => Self::SHAKE,
            GestureKind::Orientation => Self::ORIENTATION,
        }
    }
}

/// Optional callbacks, one per event kind.
#[derive(Default)]
pub struct GestureHandlers {
    gesture_start: Handler<usize>,
    gesture_end: Option<Box<dyn FnMut(usize, bool)>>,
    pan: Handler<PanGesture>,
    pinch: Handler<PinchGesture>,
    swipe: Handler<SwipeGesture>,
    tap: Handler<Point>,
    tap_pattern: Handler<TapPatternGesture>,
    long_press: Handler<LongPress>,
    force_touch: Handler<f64>,
    circle_pattern: Handler<CircleRegion>,
    draw_pattern: Handler<DrawPattern>,
    shortcut: Handler<ShortcutKind>,
    shake: Option<Box<dyn FnMut()>>,
    orientation: Handler<Orientation>,
}

impl GestureHandlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the contact count when a session begins.
    #[must_use]
    pub fn on_gesture_start(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.gesture_start = Some(Box::new(f));
        self
    }

    /// Called with the session's peak contact count and whether it was
    /// cancelled.
    #[must_use]
    pub fn on_gesture_end(mut self, f: impl FnMut(usize, bool) + 'static) -> Self {
        self.gesture_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_pan(mut self, f: impl FnMut(PanGesture) + 'static) -> Self {
        self.pan = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_pinch(mut self, f: impl FnMut(PinchGesture) + 'static) -> Self {
        self.pinch = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_swipe(mut self, f: impl FnMut(SwipeGesture) + 'static) -> Self {
        self.swipe = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(Point) + 'static) -> Self {
        self.tap = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_tap_pattern(mut self, f: impl FnMut(TapPatternGesture) + 'static) -> Self {
        self.tap_pattern = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_long_press(mut self, f: impl FnMut(LongPress) + 'static) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_force_touch(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.force_touch = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_circle_pattern(mut self, f: impl FnMut(CircleRegion) + 'static) -> Self {
        self.circle_pattern = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_draw_pattern(mut self, f: impl FnMut(DrawPattern) + 'static) -> Self {
        self.draw_pattern = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_shortcut(mut self, f: impl FnMut(ShortcutKind) + 'static) -> Self {
        self.shortcut = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_shake(mut self, f: impl FnMut() + 'static) -> Self {
        self.shake = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_orientation(mut self, f: impl FnMut(Orientation) + 'static) -> Self {
        self.orientation = Some(Box::new(f));
        self
    }

    /// Kinds that have a handler.
    #[must_use]
    pub fn registered(&self) -> GestureKinds {
        let slots = [
            (self.gesture_start.is_some(), GestureKinds::SESSION_START),
            (self.gesture_end.is_some(), GestureKinds::SESSION_END),
            (self.pan.is_some(), GestureKinds::PAN),
            (self.pinch.is_some(), GestureKinds::PINCH),
            (self.swipe.is_some(), GestureKinds::SWIPE),
            (self.tap.is_some(), GestureKinds::TAP),
            (self.tap_pattern.is_some(), GestureKinds::TAP_PATTERN),
            (self.long_press.is_some(), GestureKinds::LONG_PRESS),
            (self.force_touch.is_some(), GestureKinds::FORCE_PRESS),
            (self.circle_pattern.is_some(), GestureKinds::CIRCLE),
            (self.draw_pattern.is_some(), GestureKinds::DRAW_PATTERN),
            (self.shortcut.is_some(), GestureKinds::SHORTCUT),
            (self.shake.is_some(), GestureKinds::SHAKE),
            (self.orientation.is_some(), GestureKinds::ORIENTATION),
        ];
        slots
            .into_iter()
            .filter(|(set, _)| *set)
            .fold(GestureKinds::empty(), |acc, (_, kind)| acc | kind)
    }
}

impl fmt::Debug for GestureHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureHandlers")
            .field("registered", &self.registered())
            .finish()
    }
}

/// Routes events to the registered handlers.
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    handlers: GestureHandlers,
    delivered: u64,
}

impl GestureDispatcher {
    #[must_use]
    pub fn new(handlers: GestureHandlers) -> Self {
        Self {
            handlers,
            delivered: 0,
        }
    }

    /// Swap the handler set.
    pub fn set_handlers(&mut self, handlers: GestureHandlers) {
        self.handlers = handlers;
    }

    #[must_use]
    pub fn registered(&self) -> GestureKinds {
        self.handlers.registered()
    }

    /// Deliver `event`. Returns whether a handler received it.
    pub fn dispatch(&mut self, event: &GestureEvent) -> bool {
        let h = &mut self.handlers;
        let delivered = match *event {
            GestureEvent::SessionStart { contacts } => call(&mut h.gesture_start, contacts),
            GestureEvent::SessionEnd {
                max_contacts,
                cancelled,
            } => match h.gesture_end.as_mut() {
                Some(f) => {
                    f(max_contacts, cancelled);
                    true
                }
                None => false,
            },
            GestureEvent::Pan(pan) => call(&mut h.pan, pan),
            GestureEvent::Pinch(pinch) => call(&mut h.pinch, pinch),
            GestureEvent::Swipe(swipe) => call(&mut h.swipe, swipe),
            GestureEvent::Tap { position } => call(&mut h.tap, position),
            GestureEvent::TapPattern(pattern) => call(&mut h.tap_pattern, pattern),
            GestureEvent::LongPress(press) => call(&mut h.long_press, press),
            GestureEvent::ForcePress { force } => call(&mut h.force_touch, force),
            GestureEvent::Circle(region) => call(&mut h.circle_pattern, region),
            GestureEvent::DrawPattern(pattern) => call(&mut h.draw_pattern, pattern),
            GestureEvent::Shortcut { kind } => call(&mut h.shortcut, kind),
            GestureEvent::Shake => match h.shake.as_mut() {
                Some(f) => {
                    f();
                    true
                }
                None => false,
            },
            GestureEvent::Orientation(orientation) => call(&mut h.orientation, orientation),
        };
        if delivered {
            self.delivered += 1;
        }
        delivered
    }

    /// Events delivered to a handler so far.
    #[inline]
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

fn call<T>(handler: &mut Handler<T>, value: T) -> bool {
    match handler.as_mut() {
        Some(f) => {
            f(value);
            true
        }
        None => false,
    }
}
