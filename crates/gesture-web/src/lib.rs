#![forbid(unsafe_code)]

//! `gesture-web` hosts a [`GestureEngine`] inside a browser page.
//!
//! Design goals:
//! - **Host-driven I/O**: JS forwards DOM touch, pointer and sensor events as
//!   small JSON objects (see [`input_parser`]) and pulls classified gestures
//!   back out of a queue.
//! - **Deterministic time**: inputs carry their own `t`, or are stamped from a
//!   clock the host advances once per `requestAnimationFrame`.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! Like the engine it wraps, this crate does not bind to `wasm-bindgen`; a
//! thin binding layer can expose [`WebGestureHost`] to JS unchanged.

pub mod input_parser;

use core::time::Duration;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use gesture_core::sensor::MotionSample;
use gesture_core::{
    Capabilities, GestureConfig, GestureEngine, GestureEvent, HapticPattern, HapticSink,
    RawContact, TouchNotification, TouchPhase,
};
use thiserror::Error;

pub use input_parser::{HostInput, InputParseError, PointerPhase, parse_host_input};

/// Host construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The configuration document could not be decoded.
    #[error("invalid gesture config: {0}")]
    Config(String),
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Wall clock anchored at construction, for hosts that do not receive a
/// `requestAnimationFrame` timestamp.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: web_time::Instant,
}

impl WallClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }

    /// Time since [`WallClock::start`].
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Haptic patterns waiting for `navigator.vibrate`.
#[derive(Debug, Default)]
struct VibrationQueue {
    supported: bool,
    pending: VecDeque<HapticPattern>,
}

/// Engine-side handle onto the shared [`VibrationQueue`].
#[derive(Debug, Clone)]
struct QueuedHaptics(Rc<RefCell<VibrationQueue>>);

impl HapticSink for QueuedHaptics {
    fn is_supported(&self) -> bool {
        self.0.borrow().supported
    }

    fn notify(&mut self, pattern: HapticPattern) {
        self.0.borrow_mut().pending.push_back(pattern);
    }
}

/// Browser-side gesture host.
///
/// Owns the engine, the clock, the set of pointers currently down (for the
/// Pointer Events path) and the outbound event queue.
#[derive(Debug)]
pub struct WebGestureHost {
    engine: GestureEngine,
    clock: DeterministicClock,
    pointers: Vec<RawContact>,
    queue: VecDeque<GestureEvent>,
    vibrations: Rc<RefCell<VibrationQueue>>,
}

impl Default for WebGestureHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WebGestureHost {
    /// Host with the default configuration and capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GestureConfig) -> Self {
        let vibrations = Rc::new(RefCell::new(VibrationQueue::default()));
        let engine = GestureEngine::new(config).with_haptics(QueuedHaptics(Rc::clone(&vibrations)));
        let mut host = Self {
            engine,
            clock: DeterministicClock::new(),
            pointers: Vec::new(),
            queue: VecDeque::new(),
            vibrations,
        };
        host.sync_vibration_support();
        host
    }

    /// Host configured from a (possibly partial) JSON document.
    pub fn with_config_json(json: &str) -> Result<Self, HostError> {
        let config: GestureConfig =
            serde_json::from_str(json).map_err(|e| HostError::Config(e.to_string()))?;
        Ok(Self::with_config(config))
    }

    /// Replace the probed device capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.engine = self.engine.with_capabilities(capabilities);
        self.sync_vibration_support();
        self
    }

    fn sync_vibration_support(&mut self) {
        self.vibrations.borrow_mut().supported =
            self.engine.capabilities().contains(Capabilities::VIBRATION);
    }

    /// Decode and process one JSON input. Returns the number of gesture
    /// events queued.
    pub fn push_input_json(&mut self, json: &str) -> Result<usize, InputParseError> {
        match parse_host_input(json) {
            Ok(input) => Ok(self.push_input(input)),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "dropping undecodable host input");
                Err(err)
            }
        }
    }

    /// Process one decoded input. Returns the number of gesture events queued.
    pub fn push_input(&mut self, input: HostInput) -> usize {
        let events = match input {
            HostInput::Touch {
                phase,
                t,
                touches,
                changed,
            } => {
                let t = self.stamp(t);
                let notification = TouchNotification::new(phase, t)
                    .with_touches(touches)
                    .with_changed(changed);
                self.engine.handle(&notification)
            }
            HostInput::Pointer { phase, t, contact } => {
                let t = self.stamp(t);
                match self.pointer_notification(phase, t, contact) {
                    Some(notification) => self.engine.handle(&notification),
                    None => Vec::new(),
                }
            }
            HostInput::Motion { x, y, z, t } => {
                let timestamp = self.stamp(t);
                self.engine
                    .handle_motion(&MotionSample { x, y, z, timestamp })
            }
            HostInput::Orientation(sample) => self.engine.handle_orientation(&sample),
        };
        self.enqueue(events)
    }

    /// Fold a Pointer Events input into the tracked pointer set and produce
    /// the equivalent touch notification. Moves of pointers that are not
    /// down (hover) produce nothing.
    fn pointer_notification(
        &mut self,
        phase: PointerPhase,
        t: Duration,
        contact: RawContact,
    ) -> Option<TouchNotification> {
        let index = self.pointers.iter().position(|p| p.id == contact.id);
        match phase {
            PointerPhase::Down => match index {
                Some(i) => self.pointers[i] = contact,
                None => self.pointers.push(contact),
            },
            PointerPhase::Move => {
                let i = index?;
                self.pointers[i] = contact;
            }
            PointerPhase::Up => {
                self.pointers.remove(index?);
            }
            PointerPhase::Cancel => {
                self.pointers.clear();
                return Some(TouchNotification::new(TouchPhase::Cancel, t).with_changed([contact]));
            }
        }
        Some(
            TouchNotification::new(phase.touch_phase(), t)
                .with_touches(self.pointers.iter().copied())
                .with_changed([contact]),
        )
    }

    /// Timestamp for an input. Explicit times also pull the clock forward so
    /// later unstamped inputs never run backwards.
    fn stamp(&mut self, t: Option<Duration>) -> Duration {
        match t {
            Some(t) => {
                if t > self.clock.now() {
                    self.clock.set(t);
                }
                t
            }
            None => self.clock.now(),
        }
    }

    fn enqueue(&mut self, events: Vec<GestureEvent>) -> usize {
        let n = events.len();
        self.queue.extend(events);
        n
    }

    /// Advance the clock to `now_ms` (a `requestAnimationFrame` timestamp)
    /// and run one engine frame. Returns the number of gesture events queued.
    pub fn animation_frame(&mut self, now_ms: f64) -> usize {
        if let Some(now) = input_parser::millis(now_ms) {
            self.clock.set(now);
        }
        let events = self.engine.tick(self.clock.now());
        self.enqueue(events)
    }

    /// [`WebGestureHost::animation_frame`] driven by a wall clock.
    pub fn animation_frame_wall(&mut self, clock: &WallClock) -> usize {
        self.clock.set(clock.elapsed());
        let events = self.engine.tick(self.clock.now());
        self.enqueue(events)
    }

    /// Set the host clock without running a frame.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Drain all queued gesture events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GestureEvent> + '_ {
        self.queue.drain(..)
    }

    /// Drain all queued gesture events as a JSON array.
    pub fn drain_events_json(&mut self) -> String {
        let events: Vec<GestureEvent> = self.queue.drain(..).collect();
        match serde_json::to_string(&events) {
            Ok(json) => json,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, count = events.len(), "failed to encode gesture events");
                "[]".to_owned()
            }
        }
    }

    /// Drain queued vibration patterns as `navigator.vibrate` arguments.
    pub fn drain_vibrations(&mut self) -> Vec<&'static [u32]> {
        self.vibrations
            .borrow_mut()
            .pending
            .drain(..)
            .map(HapticPattern::vibration)
            .collect()
    }

    /// Number of pointers currently down on the Pointer Events path.
    #[must_use]
    pub fn pointers_down(&self) -> usize {
        self.pointers.len()
    }

    #[must_use]
    pub const fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GestureEngine {
        &mut self.engine
    }
}
