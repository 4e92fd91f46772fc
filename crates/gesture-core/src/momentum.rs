#![forbid(unsafe_code)]

//! Momentum (inertial glide) after a fast single-contact release.
//!
//! Frame-based exponential decay:
//!
//!   v(n+1) = v(n) × friction
//!
//! The release velocity is the last per-tick pan delta, clamped per axis to
//! `max_velocity`. Motion starts only if some axis exceeds `stop_threshold`.
//! Each animation frame first checks the current velocity: once both axes
//! are below the threshold the glide stops. Otherwise the velocity decays and
//! the decayed step is emitted, so the last pan may itself be under the
//! threshold.
//!
//! # Invariants
//!
//! 1. After `n` ticks without a stop, `velocity == v0 × friction^n`.
//! 2. Every emitted pan has `is_momentum == true`.
//! 3. A settled or cancelled simulator emits nothing until the next
//!    [`release`](MomentumSimulator::release).
//!
//! # Failure Modes
//!
//! - `friction >= 1.0`: velocity never decays and the glide runs until
//!   cancelled. The config is trusted; no clamping happens here.

use crate::config::MomentumConfig;
use crate::geometry::Vector;
use crate::gesture_event::PanGesture;

/// Observable glide state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumState {
    pub velocity: Vector,
    pub friction: f64,
    pub is_active: bool,
}

/// Whether `state` has slowed enough to stop.
#[must_use]
pub fn is_settled(state: &MomentumState, threshold: f64) -> bool {
    !state.is_active || state.velocity.both_axes_below(threshold)
}

#[derive(Debug, Clone)]
pub struct MomentumSimulator {
    config: MomentumConfig,
    state: MomentumState,
    offset: Vector,
    ticks: u32,
}

impl MomentumSimulator {
    #[must_use]
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            config,
            state: MomentumState {
                velocity: Vector::ZERO,
                friction: config.friction,
                is_active: false,
            },
            offset: Vector::ZERO,
            ticks: 0,
        }
    }

    /// Start gliding from a release velocity (px/tick). Returns whether the
    /// glide started.
    pub fn release(&mut self, velocity: Vector) -> bool {
        let velocity = velocity.clamp_axes(self.config.max_velocity);
        self.offset = Vector::ZERO;
        self.ticks = 0;
        self.state.velocity = velocity;
        self.state.is_active = velocity.any_axis_above(self.config.stop_threshold);
        #[cfg(feature = "tracing")]
        if self.state.is_active {
            tracing::debug!(vx = velocity.x, vy = velocity.y, "momentum started");
        }
        self.state.is_active
    }

    /// Advance one animation frame.
    pub fn tick(&mut self) -> Option<PanGesture> {
        if !self.state.is_active {
            return None;
        }
        if is_settled(&self.state, self.config.stop_threshold) {
            self.stop();
            return None;
        }
        self.state.velocity = self.state.velocity.scale(self.state.friction);
        self.ticks += 1;
        let v = self.state.velocity;
        self.offset += v;
        Some(PanGesture {
            delta_x: v.x,
            delta_y: v.y,
            offset_x: self.offset.x,
            offset_y: self.offset.y,
            velocity: v,
            is_momentum: true,
        })
    }

    /// Halt immediately (a new session started).
    pub fn cancel(&mut self) -> bool {
        let was_active = self.state.is_active;
        self.stop();
        was_active
    }

    fn stop(&mut self) {
        #[cfg(feature = "tracing")]
        if self.state.is_active {
            tracing::debug!(ticks = self.ticks, "momentum stopped");
        }
        self.state.is_active = false;
        self.state.velocity = Vector::ZERO;
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> MomentumState {
        self.state
    }

    /// Frames simulated since the last release.
    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
