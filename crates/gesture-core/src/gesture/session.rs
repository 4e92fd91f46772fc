#![forbid(unsafe_code)]

//! Per-session classifier state.
//!
//! A [`GestureSession`] lives from the first contact-down to the last
//! contact-up (or a cancel). It owns every classifier whose state must not
//! leak into the next session: long-press timer, force hysteresis, swipe
//! origin, pan tracking and the freehand path. Dropping the session drops
//! all of it, which is how a new session invalidates the previous one.

use std::time::Duration;

use crate::config::GestureConfig;
use crate::geometry::{Point, Vector};
use crate::gesture::{
    ForcePressDetector, LongPressDetector, PanTracker, PathBuffer, SwipeDetector,
    analyze_draw_pattern, detect_circle,
};
use crate::gesture_event::{DrawPattern, DrawPatternKind, GestureEvent, SwipeGesture};
use crate::sample::{PointerId, PointerSample, SampleFrame};

/// What a single-contact release classified as.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReleaseOutcome {
    /// Qualifying tap: position and contact-down time.
    pub tap: Option<(Point, Duration)>,
    pub swipe: Option<SwipeGesture>,
    pub pattern: Option<DrawPattern>,
    /// Velocity to hand to momentum, if the release may glide.
    pub glide: Option<Vector>,
}

/// Change in active contact count caused by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTransition {
    pub before: usize,
    pub after: usize,
}

impl ContactTransition {
    /// The frame brought the count to exactly two from something else.
    #[must_use]
    pub const fn entered_pair(self) -> bool {
        self.after == 2 && self.before != 2
    }

    /// The frame took the count away from exactly two.
    #[must_use]
    pub const fn left_pair(self) -> bool {
        self.before == 2 && self.after != 2
    }
}

#[derive(Debug, Clone)]
pub struct GestureSession {
    id: u64,
    started_at: Duration,
    contacts: Vec<PointerSample>,
    max_contacts: usize,
    primary: Option<PointerSample>,
    stationary: bool,
    circles: usize,
    long_press: LongPressDetector,
    force: ForcePressDetector,
    swipe: SwipeDetector,
    pan: PanTracker,
    path: PathBuffer,
}

impl GestureSession {
    #[must_use]
    pub fn new(id: u64, config: &GestureConfig, pressure_supported: bool, now: Duration) -> Self {
        Self {
            id,
            started_at: now,
            contacts: Vec::with_capacity(2),
            max_contacts: 0,
            primary: None,
            stationary: true,
            circles: 0,
            long_press: LongPressDetector::new(config.long_press_delay, config.jitter_threshold),
            force: ForcePressDetector::new(config.force_threshold, pressure_supported),
            swipe: SwipeDetector::new(config.swipe_max_duration, config.swipe_min_distance),
            pan: PanTracker::new(config.momentum.max_velocity),
            path: PathBuffer::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    #[inline]
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    #[inline]
    #[must_use]
    pub fn max_contacts(&self) -> usize {
        self.max_contacts
    }

    /// Latest samples of the active contacts, in arrival order.
    #[inline]
    #[must_use]
    pub fn contacts(&self) -> &[PointerSample] {
        &self.contacts
    }

    /// Whether any contact in `frame` belongs to this session.
    #[must_use]
    pub fn shares_contacts(&self, frame: &SampleFrame) -> bool {
        self.contacts
            .iter()
            .any(|c| frame.active.iter().any(|s| s.id == c.id) || frame.dropped.contains(&c.id))
    }

    /// Last known sample of `id` (for contacts lifted without coordinates).
    #[must_use]
    pub fn last_known(&self, id: PointerId) -> Option<PointerSample> {
        self.contacts.iter().find(|c| c.id == id).copied()
    }

    #[must_use]
    pub fn primary_id(&self) -> Option<PointerId> {
        self.primary.map(|p| p.id)
    }

    /// Replace the active set with `frame.active`, keeping arrival order.
    ///
    /// A contact whose sample was rejected keeps its last known sample.
    /// New contacts are appended. The first contact of a session that has
    /// only ever seen one arms the single-contact classifiers; a second
    /// contact disarms them for good.
    pub fn sync_contacts(&mut self, frame: &SampleFrame, out: &mut Vec<GestureEvent>) -> ContactTransition {
        let before = self.contacts.len();
        let mut next: Vec<PointerSample> = self
            .contacts
            .iter()
            .filter_map(|c| {
                frame
                    .active
                    .iter()
                    .find(|s| s.id == c.id)
                    .copied()
                    .or_else(|| frame.dropped.contains(&c.id).then_some(*c))
            })
            .collect();
        for sample in &frame.active {
            if !next.iter().any(|c| c.id == sample.id) {
                next.push(*sample);
            }
        }
        self.contacts = next;
        let after = self.contacts.len();
        self.max_contacts = self.max_contacts.max(after);

        if self.primary.is_none()
            && self.max_contacts == 1
            && let Some(first) = self.contacts.first().copied()
        {
            self.begin_primary(&first, out);
        }
        if after >= 2 {
            self.long_press.cancel();
            self.pan.reset();
            self.swipe.reset();
            self.path.clear();
        }
        ContactTransition { before, after }
    }

    fn begin_primary(&mut self, sample: &PointerSample, out: &mut Vec<GestureEvent>) {
        self.primary = Some(*sample);
        self.stationary = true;
        self.long_press.begin(sample);
        self.swipe.begin(sample);
        self.pan.begin(sample);
        self.path.clear();
        self.path.push(sample.position());
        self.force.reset();
        out.extend(self.force.observe(sample.pressure));
    }

    /// Single-contact move: long-press jitter, force, pan and freehand path.
    pub fn on_single_move(
        &mut self,
        sample: &PointerSample,
        config: &GestureConfig,
        out: &mut Vec<GestureEvent>,
    ) {
        if self.max_contacts != 1 || self.primary_id() != Some(sample.id) {
            return;
        }
        if self.long_press.on_move(sample) {
            self.stationary = false;
        }
        out.extend(self.force.observe(sample.pressure));
        if let Some(pan) = self.pan.update(sample) {
            out.push(GestureEvent::Pan(pan));
        }

        self.path.push(sample.position());
        if self.path.len() >= config.circle_min_points
            && let Some(region) = detect_circle(
                self.path.points(),
                config.circle_min_points,
                config.circle_variance_ratio,
            )
        {
            self.circles += 1;
            self.path.clear();
            out.push(GestureEvent::Circle(region));
        }
    }

    /// Poll the long-press timer.
    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        self.long_press.poll(now)
    }

    /// Whether the long-press timer is due at `now`.
    #[must_use]
    pub fn long_press_due(&self, now: Duration) -> bool {
        self.long_press.deadline().is_some_and(|deadline| now >= deadline)
    }

    /// Whether the long-press fired for the primary contact.
    #[must_use]
    pub fn long_pressed(&self) -> bool {
        self.long_press.fired()
    }

    /// Classify the release of the last contact.
    ///
    /// Multi-contact and long-pressed sessions yield an empty outcome.
    pub fn release(&mut self, end: &PointerSample, config: &GestureConfig) -> ReleaseOutcome {
        self.long_press.cancel();
        let mut outcome = ReleaseOutcome::default();
        let Some(primary) = self.primary else {
            return outcome;
        };
        if self.max_contacts != 1 || end.id != primary.id || self.long_press.fired() {
            self.path.clear();
            return outcome;
        }

        let held = end.timestamp.saturating_sub(primary.timestamp);
        let within_jitter = primary.position().distance(end.position()) <= config.jitter_threshold;
        if self.stationary && within_jitter && held < config.long_press_delay {
            outcome.tap = Some((end.position(), primary.timestamp));
            self.path.clear();
            return outcome;
        }

        outcome.swipe = self.swipe.classify(end);
        if outcome.swipe.is_none() && self.path.len() >= config.draw_min_points {
            let pattern = analyze_draw_pattern(self.path.points(), config.draw_displacement);
            if pattern.kind != DrawPatternKind::Unknown {
                outcome.pattern = Some(pattern);
            }
        }
        self.path.clear();

        let velocity = self.pan.velocity();
        if velocity.any_axis_above(config.momentum.stop_threshold) {
            outcome.glide = Some(velocity);
        }
        outcome
    }

    /// Stop every timer without classifying (cancel / invalidation).
    pub fn abort(&mut self) {
        self.long_press.reset();
        self.swipe.reset();
        self.pan.reset();
        self.path.clear();
    }

    #[inline]
    #[must_use]
    pub fn circles(&self) -> usize {
        self.circles
    }
}
