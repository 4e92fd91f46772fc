#![forbid(unsafe_code)]

//! Move throttling for high-frequency touch input.
//!
//! Touch screens report moves far faster than the display refreshes. Running
//! every classifier on each one burns CPU and battery for no visible gain, so
//! [`MoveThrottle`] lets at most one move frame through per frame interval
//! (~16.7ms) with "latest wins" semantics:
//!
//! - A move arriving a full interval after the last processed one passes
//!   through immediately.
//! - A move arriving sooner replaces any pending move. The replaced frame is
//!   dropped, never queued.
//! - Start/End/Cancel frames pass through untouched. The caller decides what
//!   to do with the pending move first ([`take_pending`](MoveThrottle::take_pending)
//!   before a release so the final position is seen, [`discard`](MoveThrottle::discard)
//!   on cancel).
//! - On each animation frame the caller calls [`flush`](MoveThrottle::flush)
//!   to release the pending move, if any.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use gesture_core::event_coalescer::MoveThrottle;
//! use gesture_core::sample::{SampleFrame, TouchPhase};
//!
//! let frame = |ms| SampleFrame {
//!     phase: TouchPhase::Move,
//!     timestamp: Duration::from_millis(ms),
//!     active: Vec::new(),
//!     changed: Vec::new(),
//!     dropped: Vec::new(),
//! };
//! let mut throttle = MoveThrottle::new(Duration::from_micros(16_700));
//!
//! assert!(throttle.push(frame(0)).is_some());  // first move passes
//! assert!(throttle.push(frame(5)).is_none());  // held
//! assert!(throttle.push(frame(9)).is_none());  // replaces the 5ms frame
//! let flushed = throttle.flush().unwrap();
//! assert_eq!(flushed.timestamp, Duration::from_millis(9));
//! assert_eq!(throttle.dropped(), 1);
//! ```

use std::time::Duration;

use crate::sample::{SampleFrame, TouchPhase};

/// Throttles move frames to one per frame interval.
///
/// Not thread-safe; lives on the UI thread with the engine.
#[derive(Debug, Clone, Default)]
pub struct MoveThrottle {
    interval: Duration,
    last_processed: Option<Duration>,
    pending: Option<SampleFrame>,
    dropped: u64,
}

impl MoveThrottle {
    /// Create a throttle. A zero interval disables throttling.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Push a frame.
    ///
    /// Returns `Some(frame)` if it should be processed now, `None` if it was
    /// held as the pending move.
    pub fn push(&mut self, frame: SampleFrame) -> Option<SampleFrame> {
        if frame.phase != TouchPhase::Move || self.interval.is_zero() {
            return Some(frame);
        }
        let due = self
            .last_processed
            .is_none_or(|last| frame.timestamp.saturating_sub(last) >= self.interval);
        if due {
            if self.pending.take().is_some() {
                self.dropped += 1;
            }
            self.last_processed = Some(frame.timestamp);
            Some(frame)
        } else {
            if self.pending.replace(frame).is_some() {
                self.dropped += 1;
            }
            None
        }
    }

    /// Release the pending move at an animation frame boundary.
    pub fn flush(&mut self) -> Option<SampleFrame> {
        let frame = self.pending.take()?;
        self.last_processed = Some(frame.timestamp);
        Some(frame)
    }

    /// Take the pending move without waiting for a frame boundary.
    pub fn take_pending(&mut self) -> Option<SampleFrame> {
        self.flush()
    }

    /// Drop the pending move.
    pub fn discard(&mut self) {
        if self.pending.take().is_some() {
            self.dropped += 1;
        }
    }

    /// Forget timing history; the next move passes immediately.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_processed = None;
    }

    /// Whether a move is waiting for the next frame.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of move frames dropped so far.
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
