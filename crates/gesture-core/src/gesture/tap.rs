#![forbid(unsafe_code)]

//! Tap-pattern counter.
//!
//! Taps aggregate into reactions: each qualifying tap is appended to a rolling
//! window keyed by touch-down time (entries `tap_window` or more older than
//! the newest tap's down time are pruned) and restarts the
//! finalize debounce. When the debounce expires the pattern is mapped to a
//! [`TapPatternKind`] and cleared. The window outlives gesture sessions since
//! every tap is its own session.

use std::collections::VecDeque;
use std::time::Duration;

use crate::geometry::Point;
use crate::gesture_event::{GestureEvent, TapPatternGesture, TapPatternKind};
use crate::timer::OneShot;

#[derive(Debug, Clone)]
pub struct TapPatternCounter {
    window: Duration,
    finalize_delay: Duration,
    taps: VecDeque<Duration>,
    last_position: Point,
    finalize: OneShot,
}

impl TapPatternCounter {
    #[must_use]
    pub fn new(window: Duration, finalize_delay: Duration) -> Self {
        Self {
            window,
            finalize_delay,
            taps: VecDeque::with_capacity(8),
            last_position: Point::ZERO,
            finalize: OneShot::new(),
        }
    }

    /// Record a completed tap that went down at `down_at` and lifted at `now`.
    pub fn record_tap(&mut self, position: Point, down_at: Duration, now: Duration) {
        self.taps.push_back(down_at);
        while let Some(&oldest) = self.taps.front() {
            if down_at.saturating_sub(oldest) < self.window {
                break;
            }
            self.taps.pop_front();
        }
        self.last_position = position;
        self.finalize.arm(now, self.finalize_delay);
    }

    /// Finalize the pattern if the debounce has expired.
    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        if !self.finalize.poll(now) {
            return None;
        }
        let taps = self.taps.len();
        self.taps.clear();
        match TapPatternKind::from_count(taps) {
            Some(kind) => Some(GestureEvent::TapPattern(TapPatternGesture { kind, taps })),
            None if taps == 1 => Some(GestureEvent::Tap {
                position: self.last_position,
            }),
            // The window pruned every entry; nothing to report.
            None => None,
        }
    }

    /// Abandon the pending pattern without reporting it.
    pub fn cancel(&mut self) {
        self.finalize.cancel();
        self.taps.clear();
    }

    /// Taps recorded in the current window.
    #[must_use]
    pub fn pending_taps(&self) -> usize {
        self.taps.len()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.finalize.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn counter() -> TapPatternCounter {
        TapPatternCounter::new(ms(1000), ms(300))
    }

    fn tap(c: &mut TapPatternCounter, at: u64) {
        c.record_tap(Point::new(5.0, 5.0), ms(at), ms(at + 40));
    }

    #[test]
    fn three_quick_taps_are_love() {
        let mut c = counter();
        tap(&mut c, 0);
        assert!(c.poll(ms(100)).is_none());
        tap(&mut c, 120);
        tap(&mut c, 240);
        assert!(c.poll(ms(579)).is_none());
        let ev = c.poll(ms(580)).unwrap();
        assert_eq!(
            ev,
            GestureEvent::TapPattern(TapPatternGesture {
                kind: TapPatternKind::Love,
                taps: 3
            })
        );
        assert!(c.poll(ms(2000)).is_none());
        assert_eq!(c.pending_taps(), 0);
    }

    #[test]
    fn single_tap_reports_position() {
        let mut c = counter();
        tap(&mut c, 0);
        assert_eq!(
            c.poll(ms(340)),
            Some(GestureEvent::Tap {
                position: Point::new(5.0, 5.0)
            })
        );
    }

    #[test]
    fn five_or_more_is_poggers_with_count() {
        let mut c = counter();
        for i in 0..7 {
            tap(&mut c, i * 100);
        }
        match c.poll(ms(2000)) {
            Some(GestureEvent::TapPattern(p)) => {
                assert_eq!(p.kind, TapPatternKind::Poggers);
                assert_eq!(p.taps, 7);
            }
            other => panic!("expected poggers, got {other:?}"),
        }
    }

    #[test]
    fn window_prunes_old_taps() {
        let mut c = counter();
        // 250ms spacing keeps the debounce alive for 1.5s.
        for i in 0..6 {
            tap(&mut c, i * 250);
        }
        // At the last tap (down at 1250ms) taps at 0 and 250 are >= 1000ms old.
        assert_eq!(c.pending_taps(), 4);
    }

    #[test]
    fn window_is_measured_between_down_times() {
        let mut c = counter();
        tap(&mut c, 0);
        // Down 900ms after the first tap, held until 1200ms.
        c.record_tap(Point::new(5.0, 5.0), ms(900), ms(1200));
        assert_eq!(c.pending_taps(), 2);
        assert_eq!(
            c.poll(ms(1500)),
            Some(GestureEvent::TapPattern(TapPatternGesture {
                kind: TapPatternKind::QuickLike,
                taps: 2
            }))
        );
    }

    #[test]
    fn cancel_discards_pattern() {
        let mut c = counter();
        tap(&mut c, 0);
        tap(&mut c, 100);
        c.cancel();
        assert!(c.poll(ms(5000)).is_none());
    }
}
