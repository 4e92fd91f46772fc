#![forbid(unsafe_code)]

//! Direction-sequence shortcuts for power users.
//!
//! Each swipe direction is appended to a sequence and restarts a debounce.
//! When the debounce expires the sequence is matched against the known
//! shortcuts and cleared either way.

use std::time::Duration;

use crate::gesture_event::{GestureEvent, ShortcutKind, SwipeDirection};
use crate::timer::OneShot;

use crate::gesture_event::SwipeDirection::{Down, Left, Right, Up};

const MAX_SEQUENCE: usize = 8;

const SHORTCUTS: &[(ShortcutKind, &[SwipeDirection])] = &[
    (ShortcutKind::LShape, &[Down, Right]),
    (ShortcutKind::Zigzag, &[Up, Down, Up, Down]),
    (ShortcutKind::Triangle, &[Up, Right, Left]),
];

#[derive(Debug, Clone)]
pub struct ShortcutRecognizer {
    timeout: Duration,
    sequence: Vec<SwipeDirection>,
    timer: OneShot,
}

impl ShortcutRecognizer {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            sequence: Vec::with_capacity(MAX_SEQUENCE),
            timer: OneShot::new(),
        }
    }

    pub fn push(&mut self, direction: SwipeDirection, now: Duration) {
        if self.sequence.len() == MAX_SEQUENCE {
            self.sequence.remove(0);
        }
        self.sequence.push(direction);
        self.timer.arm(now, self.timeout);
    }

    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        if !self.timer.poll(now) {
            return None;
        }
        let matched = match_shortcut(&self.sequence);
        self.sequence.clear();
        matched.map(|kind| GestureEvent::Shortcut { kind })
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.sequence.clear();
    }
}

/// Exact match of a complete direction sequence.
#[must_use]
pub fn match_shortcut(sequence: &[SwipeDirection]) -> Option<ShortcutKind> {
    SHORTCUTS
        .iter()
        .find(|(_, pattern)| *pattern == sequence)
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn known_sequences_match() {
        assert_eq!(match_shortcut(&[Down, Right]), Some(ShortcutKind::LShape));
        assert_eq!(match_shortcut(&[Up, Down, Up, Down]), Some(ShortcutKind::Zigzag));
        assert_eq!(match_shortcut(&[Up, Right, Left]), Some(ShortcutKind::Triangle));
        assert_eq!(match_shortcut(&[Down]), None);
        assert_eq!(match_shortcut(&[Down, Right, Up]), None);
    }

    #[test]
    fn fires_after_debounce() {
        let mut r = ShortcutRecognizer::new(ms(500));
        r.push(Down, ms(0));
        r.push(Right, ms(200));
        assert!(r.poll(ms(600)).is_none());
        assert_eq!(
            r.poll(ms(700)),
            Some(GestureEvent::Shortcut {
                kind: ShortcutKind::LShape
            })
        );
    }

    #[test]
    fn unmatched_sequence_is_discarded() {
        let mut r = ShortcutRecognizer::new(ms(500));
        r.push(Left, ms(0));
        assert!(r.poll(ms(500)).is_none());
        r.push(Down, ms(1000));
        r.push(Right, ms(1100));
        assert!(r.poll(ms(1600)).is_some());
    }

    #[test]
    fn cancel_clears() {
        let mut r = ShortcutRecognizer::new(ms(500));
        r.push(Down, ms(0));
        r.push(Right, ms(10));
        r.cancel();
        assert!(r.poll(ms(10_000)).is_none());
    }
}
