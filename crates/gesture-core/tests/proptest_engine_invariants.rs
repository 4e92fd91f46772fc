//! Property-based invariants for the gesture pipeline.
//!
//! 1. **Zoom clamp**: whatever the two-contact geometry, every pinch zoom lies
//!    within the configured bounds.
//! 2. **Geometric decay**: after `n` momentum ticks the velocity equals
//!    `v0 × friction^n`, and a glide always terminates.
//! 3. **Latest wins**: a burst of moves inside one frame interval hands
//!    exactly the last one to the next flush.
//! 4. **Robustness**: arbitrary notification streams never panic, and every
//!    `SessionStart` is eventually matched by a `SessionEnd`.

#![forbid(unsafe_code)]

use std::time::Duration;

use gesture_core::event_coalescer::MoveThrottle;
use gesture_core::sample::{SampleFrame, TouchPhase};
use gesture_core::{
    GestureConfig, GestureEngine, GestureEvent, GestureKind, MomentumConfig, MomentumSimulator,
    RawContact, TouchNotification, Vector,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f64> {
    -2000.0f64..2000.0
}

fn phase() -> impl Strategy<Value = TouchPhase> {
    prop_oneof![
        Just(TouchPhase::Start),
        Just(TouchPhase::Move),
        Just(TouchPhase::End),
        Just(TouchPhase::Cancel),
    ]
}

fn contact() -> impl Strategy<Value = RawContact> {
    (
        0u32..4,
        proptest::option::weighted(0.95, coord()),
        proptest::option::weighted(0.95, coord()),
        proptest::option::of(0.0f64..1.5),
    )
        .prop_map(|(id, x, y, pressure)| RawContact { id, x, y, pressure })
}

fn notification() -> impl Strategy<Value = (TouchPhase, u64, Vec<RawContact>, Vec<RawContact>)> {
    (
        phase(),
        0u64..200,
        proptest::collection::vec(contact(), 0..4),
        proptest::collection::vec(contact(), 0..2),
    )
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// ── Zoom clamp ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pinch_zoom_always_within_bounds(
        a in (coord(), coord()),
        b in (coord(), coord()),
        moves in proptest::collection::vec((coord(), coord()), 1..20),
    ) {
        let config = GestureConfig::default();
        let (min, max) = (config.min_zoom, config.max_zoom);
        let mut engine = GestureEngine::new(config);
        let first = RawContact::at(1, a.0, a.1);
        let mut second = RawContact::at(2, b.0, b.1);
        engine.handle(&TouchNotification::new(TouchPhase::Start, ms(0)).with_touches([first]));
        engine.handle(
            &TouchNotification::new(TouchPhase::Start, ms(5)).with_touches([first, second]),
        );

        let mut t = 5;
        for (x, y) in moves {
            t += 20;
            second = RawContact::at(2, x, y);
            let events = engine.handle(
                &TouchNotification::new(TouchPhase::Move, ms(t)).with_touches([first, second]),
            );
            for event in events {
                if let GestureEvent::Pinch(pinch) = event {
                    prop_assert!(pinch.zoom >= min && pinch.zoom <= max, "zoom {}", pinch.zoom);
                }
            }
            prop_assert!(engine.zoom() >= min && engine.zoom() <= max);
        }
    }
}

// ── Momentum ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn momentum_decays_geometrically(
        vx in -50.0f64..50.0,
        vy in -50.0f64..50.0,
        n in 1u32..30,
    ) {
        let config = MomentumConfig::default();
        let mut sim = MomentumSimulator::new(config);
        prop_assume!(sim.release(Vector::new(vx, vy)));
        for _ in 0..n {
            if sim.tick().is_none() {
                break;
            }
        }
        if sim.is_active() {
            let expected = config.friction.powi(n as i32);
            let v = sim.state().velocity;
            prop_assert!((v.x - vx * expected).abs() < 1e-9);
            prop_assert!((v.y - vy * expected).abs() < 1e-9);
        }
    }

    #[test]
    fn momentum_always_terminates(
        vx in -500.0f64..500.0,
        vy in -500.0f64..500.0,
    ) {
        let mut sim = MomentumSimulator::new(MomentumConfig::default());
        sim.release(Vector::new(vx, vy));
        let emitted = std::iter::from_fn(|| sim.tick()).take(1_000).count();
        // 50 × 0.95^45 < 5: the clamp bounds every glide.
        prop_assert!(emitted <= 45);
        prop_assert!(!sim.is_active());
        prop_assert!(sim.tick().is_none());
    }
}

// ── Throttle ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn throttle_keeps_latest_move(offsets in proptest::collection::vec(1u64..16, 1..12)) {
        let frame = |t: u64| SampleFrame {
            phase: TouchPhase::Move,
            timestamp: Duration::from_micros(t),
            active: Vec::new(),
            changed: Vec::new(),
            dropped: Vec::new(),
        };
        let mut throttle = MoveThrottle::new(Duration::from_micros(16_700));
        prop_assert!(throttle.push(frame(0)).is_some());

        // All later moves land inside the first frame interval.
        let mut t = 0;
        let mut last = 0;
        for step in &offsets {
            t += step * 100;
            last = t;
            prop_assert!(throttle.push(frame(t)).is_none());
        }
        let flushed = throttle.flush();
        prop_assert_eq!(flushed.map(|f| f.timestamp), Some(Duration::from_micros(last)));
        prop_assert_eq!(throttle.dropped(), offsets.len() as u64 - 1);
    }
}

// ── Robustness ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn arbitrary_streams_never_panic(stream in proptest::collection::vec(notification(), 0..60)) {
        let mut engine = GestureEngine::new(GestureConfig::default());
        let mut now = 0;
        let mut starts = 0usize;
        let mut ends = 0usize;
        let mut count = |events: &[GestureEvent]| {
            for e in events {
                match e.kind() {
                    GestureKind::SessionStart => starts += 1,
                    GestureKind::SessionEnd => ends += 1,
                    _ => {}
                }
            }
        };

        for (phase, gap, touches, changed) in stream {
            now += gap;
            let events = engine.handle(
                &TouchNotification::new(phase, ms(now))
                    .with_touches(touches)
                    .with_changed(changed),
            );
            count(&events);
            count(&engine.tick(ms(now + 8)));
        }
        count(&engine.reset());
        prop_assert_eq!(starts, ends);
        prop_assert!(!engine.is_session_active());
    }
}
