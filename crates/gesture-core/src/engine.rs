#![forbid(unsafe_code)]

//! The gesture engine: one entry point for touch input, animation frames and
//! ambient sensor samples.
//!
//! # Pipeline
//!
//! ```text
//! TouchNotification ─► SampleNormalizer ─► MoveThrottle ─► GestureSession ─┐
//!                                                        └► PinchRecognizer ┤
//!                          TapPatternCounter ◄─ release ◄──────────────────┤
//!                          ShortcutRecognizer ◄─ swipe                      │
//!                          MomentumSimulator ◄─ glide                       │
//!                                                                           ▼
//!                                         HapticSink ◄─ GestureDispatcher ◄─ Vec<GestureEvent>
//! ```
//!
//! Every entry point first polls the pending timers with the input's
//! timestamp, then processes the input, then hands the resulting events to
//! the haptic sink and the registered handlers, and finally returns them.
//!
//! # Invariants
//!
//! 1. At most one [`GestureSession`] is live. A start notification whose
//!    contacts share nothing with the live session ends it (cancelled) and
//!    begins a new one.
//! 2. Starting a session cancels momentum before anything else happens, so
//!    no momentum pan is ever returned after a `SessionStart`.
//! 3. Each session yields exactly one `SessionStart` and one `SessionEnd`.
//! 4. Tap patterns and direction shortcuts outlive sessions. A release that
//!    is not a tap, or a cancel, abandons the pending tap pattern.
//!
//! # Failure Modes
//!
//! - Malformed contacts are dropped by the normalizer; a frame left with no
//!   contacts does not start a session.
//! - Timestamps going backwards are tolerated: timers simply do not fire
//!   until time catches up.

use core::fmt;
use std::time::Duration;

use crate::capabilities::{Capabilities, HapticPattern, HapticSink, NoHaptics};
use crate::config::GestureConfig;
use crate::dispatch::{GestureDispatcher, GestureHandlers};
use crate::error::SensorKind;
use crate::event_coalescer::MoveThrottle;
use crate::geometry::Vector;
use crate::gesture::session::GestureSession;
use crate::gesture::{PinchRecognizer, ShortcutRecognizer, TapPatternCounter};
use crate::gesture_event::{DrawPatternKind, GestureEvent, TapPatternKind};
use crate::momentum::MomentumSimulator;
use crate::sample::{
    NormalizerStats, PointerSample, SampleFrame, SampleNormalizer, TouchNotification, TouchPhase,
};
use crate::sensor::{
    MotionPermission, MotionSample, OrientationSample, OrientationTracker, PermissionState,
    ShakeDetector,
};

/// Capabilities double as a prompt-free permission provider: a declared
/// sensor is granted, an undeclared one is unsupported.
impl MotionPermission for Capabilities {
    fn is_supported(&self, kind: SensorKind) -> bool {
        match kind {
            SensorKind::Motion => self.contains(Capabilities::DEVICE_MOTION),
            SensorKind::Orientation => self.contains(Capabilities::DEVICE_ORIENTATION),
        }
    }

    fn request(&mut self, _kind: SensorKind) -> PermissionState {
        PermissionState::NotRequired
    }
}

/// Haptic feedback played for `event`, if any.
#[must_use]
pub fn haptic_for(event: &GestureEvent) -> Option<HapticPattern> {
    match event {
        GestureEvent::TapPattern(pattern) => Some(match pattern.kind {
            TapPatternKind::QuickLike => HapticPattern::Reaction,
            TapPatternKind::Love => HapticPattern::Streak,
            TapPatternKind::Fire => HapticPattern::PowerUser,
            TapPatternKind::Poggers => HapticPattern::Achievement,
        }),
        GestureEvent::Circle(_) => Some(HapticPattern::Unlock),
        GestureEvent::DrawPattern(pattern) => match pattern.kind {
            DrawPatternKind::Checkmark => Some(HapticPattern::Success),
            DrawPatternKind::X => Some(HapticPattern::Error),
            DrawPatternKind::Unknown => None,
        },
        GestureEvent::Swipe(_) => Some(HapticPattern::Light),
        GestureEvent::LongPress(_) | GestureEvent::Shake => Some(HapticPattern::Medium),
        GestureEvent::ForcePress { .. } => Some(HapticPattern::Heavy),
        GestureEvent::Shortcut { .. } => Some(HapticPattern::PowerUser),
        _ => None,
    }
}

pub struct GestureEngine {
    config: GestureConfig,
    capabilities: Capabilities,
    normalizer: SampleNormalizer,
    throttle: MoveThrottle,
    session: Option<GestureSession>,
    next_session: u64,
    taps: TapPatternCounter,
    shortcuts: ShortcutRecognizer,
    pinch: PinchRecognizer,
    momentum: MomentumSimulator,
    shake: ShakeDetector,
    orientation: OrientationTracker,
    dispatcher: GestureDispatcher,
    haptics: Box<dyn HapticSink>,
    now: Duration,
}

impl GestureEngine {
    /// Engine with default capabilities, no handlers and no haptics.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        let mut capabilities = Capabilities::default();
        Self {
            capabilities,
            normalizer: SampleNormalizer::new(),
            throttle: MoveThrottle::new(config.frame_interval),
            session: None,
            next_session: 1,
            taps: TapPatternCounter::new(config.tap_window, config.tap_finalize_delay),
            shortcuts: ShortcutRecognizer::new(config.shortcut_timeout),
            pinch: PinchRecognizer::new(config.min_zoom, config.max_zoom, config.pinch_pan_factor),
            momentum: MomentumSimulator::new(config.momentum),
            shake: ShakeDetector::new(config.shake, &mut capabilities),
            orientation: OrientationTracker::new(&mut capabilities),
            dispatcher: GestureDispatcher::default(),
            haptics: Box::new(NoHaptics),
            now: Duration::ZERO,
            config,
        }
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: GestureHandlers) -> Self {
        self.dispatcher.set_handlers(handlers);
        self
    }

    #[must_use]
    pub fn with_haptics(mut self, sink: impl HapticSink + 'static) -> Self {
        self.haptics = Box::new(sink);
        self
    }

    /// Declare device capabilities. Sensors declared here are enabled
    /// without a permission prompt.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        let mut provider = capabilities;
        self.shake = ShakeDetector::new(self.config.shake, &mut provider);
        self.orientation = OrientationTracker::new(&mut provider);
        self
    }

    /// Acquire sensor access through `permission`. A denied or unsupported
    /// sensor leaves its detector disabled.
    #[must_use]
    pub fn with_motion_permission(mut self, permission: &mut dyn MotionPermission) -> Self {
        self.shake = ShakeDetector::new(self.config.shake, permission);
        self.orientation = OrientationTracker::new(permission);
        self
    }

    pub fn set_handlers(&mut self, handlers: GestureHandlers) {
        self.dispatcher.set_handlers(handlers);
    }

    // -- Input -------------------------------------------------------------

    /// Process one touch notification.
    pub fn handle(&mut self, notification: &TouchNotification) -> Vec<GestureEvent> {
        let frame = self.normalizer.normalize(notification);
        let mut out = Vec::new();
        match frame.phase {
            TouchPhase::Start => {
                self.flush_pending(&mut out);
                self.poll_timers(frame.timestamp, &mut out);
                self.on_start(&frame, &mut out);
            }
            TouchPhase::Move => {
                self.settle_pending(frame.timestamp, &mut out);
                self.poll_timers(frame.timestamp, &mut out);
                if let Some(frame) = self.throttle.push(frame) {
                    self.process_move(&frame, &mut out);
                }
            }
            TouchPhase::End => {
                self.flush_pending(&mut out);
                self.poll_timers(frame.timestamp, &mut out);
                self.on_end(&frame, &mut out);
            }
            TouchPhase::Cancel => {
                self.throttle.discard();
                self.poll_timers(frame.timestamp, &mut out);
                self.cancel_session(&mut out);
            }
        }
        self.deliver(&out);
        out
    }

    /// Animation frame: release the throttled move, fire due timers and
    /// advance momentum by one step.
    pub fn tick(&mut self, now: Duration) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.flush_pending(&mut out);
        self.poll_timers(now, &mut out);
        if let Some(pan) = self.momentum.tick() {
            out.push(GestureEvent::Pan(pan));
        }
        self.deliver(&out);
        out
    }

    /// Feed one accelerometer reading.
    pub fn handle_motion(&mut self, sample: &MotionSample) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.settle_pending(sample.timestamp, &mut out);
        self.poll_timers(sample.timestamp, &mut out);
        out.extend(self.shake.on_motion(sample));
        self.deliver(&out);
        out
    }

    /// Feed one orientation reading.
    pub fn handle_orientation(&mut self, sample: &OrientationSample) -> Vec<GestureEvent> {
        let out: Vec<GestureEvent> = self.orientation.on_orientation(sample).into_iter().collect();
        self.deliver(&out);
        out
    }

    /// Drop the live session and every pending timer, pattern and glide.
    /// Returns the `SessionEnd` of the dropped session, if there was one.
    pub fn reset(&mut self) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        self.throttle.reset();
        self.cancel_session(&mut out);
        self.shortcuts.cancel();
        self.momentum.cancel();
        self.deliver(&out);
        out
    }

    /// Restore zoom and view pan to their neutral values.
    pub fn reset_view(&mut self) {
        self.pinch.reset_view();
    }

    // -- Queries -----------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Accumulated pinch zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.pinch.zoom()
    }

    /// Accumulated two-contact view pan.
    #[must_use]
    pub fn view_pan(&self) -> Vector {
        self.pinch.pan()
    }

    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_momentum_active(&self) -> bool {
        self.momentum.is_active()
    }

    /// Active contacts of the live session.
    #[must_use]
    pub fn contacts(&self) -> &[PointerSample] {
        self.session.as_ref().map_or(&[], |s| s.contacts())
    }

    /// Latest timestamp the engine has seen.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn normalizer_stats(&self) -> NormalizerStats {
        self.normalizer.stats()
    }

    /// Move frames discarded by the throttle.
    #[must_use]
    pub fn dropped_moves(&self) -> u64 {
        self.throttle.dropped()
    }

    // -- Internals ---------------------------------------------------------

    fn poll_timers(&mut self, now: Duration, out: &mut Vec<GestureEvent>) {
        self.now = self.now.max(now);
        if let Some(session) = self.session.as_mut() {
            out.extend(session.poll(now));
        }
        out.extend(self.taps.poll(now));
        out.extend(self.shortcuts.poll(now));
    }

    fn flush_pending(&mut self, out: &mut Vec<GestureEvent>) {
        if let Some(frame) = self.throttle.take_pending() {
            self.poll_timers(frame.timestamp, out);
            self.process_move(&frame, out);
        }
    }

    /// A held move happened before `now`; it must reach the long-press
    /// detector before that timer is checked at `now`.
    fn settle_pending(&mut self, now: Duration, out: &mut Vec<GestureEvent>) {
        if self.throttle.has_pending()
            && self
                .session
                .as_ref()
                .is_some_and(|session| session.long_press_due(now))
        {
            self.flush_pending(out);
        }
    }

    fn on_start(&mut self, frame: &SampleFrame, out: &mut Vec<GestureEvent>) {
        if frame.active.is_empty() {
            return;
        }
        if self
            .session
            .as_ref()
            .is_some_and(|session| !session.shares_contacts(frame))
        {
            self.cancel_session(out);
        }
        if self.session.is_none() {
            self.begin_session(frame.timestamp);
            out.push(GestureEvent::SessionStart {
                contacts: frame.contact_count(),
            });
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let transition = session.sync_contacts(frame, out);
        if transition.entered_pair() {
            Self::begin_pinch(&mut self.pinch, session);
        } else if transition.left_pair() {
            self.pinch.end();
        }
    }

    fn begin_session(&mut self, now: Duration) {
        if self.momentum.cancel() {
            #[cfg(feature = "tracing")]
            tracing::debug!("momentum halted by new session");
        }
        self.throttle.reset();
        let id = self.next_session;
        self.next_session += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(session = id, "session started");
        self.session = Some(GestureSession::new(
            id,
            &self.config,
            self.capabilities.contains(Capabilities::PRESSURE),
            now,
        ));
    }

    fn begin_pinch(pinch: &mut PinchRecognizer, session: &GestureSession) {
        if let &[a, b] = session.contacts() {
            pinch.begin(&a, &b);
        }
    }

    fn process_move(&mut self, frame: &SampleFrame, out: &mut Vec<GestureEvent>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let transition = session.sync_contacts(frame, out);
        if transition.entered_pair() {
            Self::begin_pinch(&mut self.pinch, session);
            return;
        }
        if transition.left_pair() {
            self.pinch.end();
        }
        match session.contact_count() {
            1 => {
                if let Some(primary) = session.primary_id()
                    && let Some(sample) = frame.sample(primary).copied()
                {
                    session.on_single_move(&sample, &self.config, out);
                }
            }
            2 => {
                if let &[a, b] = session.contacts()
                    && let Some(pinch) = self.pinch.update(&a, &b)
                {
                    out.push(GestureEvent::Pinch(pinch));
                }
            }
            _ => {}
        }
    }

    fn on_end(&mut self, frame: &SampleFrame, out: &mut Vec<GestureEvent>) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        // Lifted contacts, preferring the coordinates reported at lift.
        let lifted: Vec<PointerSample> = session
            .contacts()
            .iter()
            .filter(|c| {
                !frame.active.iter().any(|a| a.id == c.id) && !frame.dropped.contains(&c.id)
            })
            .map(|c| {
                frame
                    .changed
                    .iter()
                    .find(|s| s.id == c.id)
                    .copied()
                    .unwrap_or(PointerSample {
                        timestamp: frame.timestamp,
                        ..*c
                    })
            })
            .collect();

        let transition = session.sync_contacts(frame, out);
        if transition.entered_pair() {
            Self::begin_pinch(&mut self.pinch, &session);
        } else if transition.left_pair() {
            self.pinch.end();
        }

        if transition.after > 0 {
            self.session = Some(session);
            return;
        }

        let end = lifted
            .iter()
            .find(|s| Some(s.id) == session.primary_id())
            .or_else(|| lifted.last())
            .copied();
        if let Some(end) = end {
            self.classify_release(&mut session, &end, out);
        } else {
            self.taps.cancel();
        }
        self.finish_session(&session, false, out);
    }

    fn classify_release(
        &mut self,
        session: &mut GestureSession,
        end: &PointerSample,
        out: &mut Vec<GestureEvent>,
    ) {
        let outcome = session.release(end, &self.config);
        match outcome.tap {
            Some((position, down_at)) => self.taps.record_tap(position, down_at, end.timestamp),
            None => self.taps.cancel(),
        }
        if let Some(swipe) = outcome.swipe {
            self.shortcuts.push(swipe.direction, end.timestamp);
            out.push(GestureEvent::Swipe(swipe));
        }
        if let Some(pattern) = outcome.pattern {
            out.push(GestureEvent::DrawPattern(pattern));
        }
        if let Some(velocity) = outcome.glide {
            self.momentum.release(velocity);
        }
    }

    fn cancel_session(&mut self, out: &mut Vec<GestureEvent>) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.abort();
        self.taps.cancel();
        self.finish_session(&session, true, out);
    }

    fn finish_session(
        &mut self,
        session: &GestureSession,
        cancelled: bool,
        out: &mut Vec<GestureEvent>,
    ) {
        self.pinch.end();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            session = session.id(),
            max_contacts = session.max_contacts(),
            circles = session.circles(),
            cancelled,
            "session ended"
        );
        out.push(GestureEvent::SessionEnd {
            max_contacts: session.max_contacts(),
            cancelled,
        });
    }

    fn deliver(&mut self, events: &[GestureEvent]) {
        if events.is_empty() {
            return;
        }
        let haptics = self.haptics.is_supported();
        for event in events {
            #[cfg(feature = "tracing")]
            if matches!(event, GestureEvent::Pan(_) | GestureEvent::Pinch(_)) {
                tracing::trace!(kind = ?event.kind(), "gesture");
            } else {
                tracing::debug!(kind = ?event.kind(), "gesture");
            }
            if haptics && let Some(pattern) = haptic_for(event) {
                self.haptics.notify(pattern);
            }
            self.dispatcher.dispatch(event);
        }
    }
}

impl fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureEngine")
            .field("config", &self.config)
            .field("capabilities", &self.capabilities)
            .field("session", &self.session)
            .field("momentum", &self.momentum)
            .field("zoom", &self.pinch.zoom())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
