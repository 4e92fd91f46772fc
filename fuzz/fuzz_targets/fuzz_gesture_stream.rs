#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use gesture_core::{
    Capabilities, GestureConfig, GestureEngine, GestureEvent, GestureKind, RawContact,
    TouchNotification, TouchPhase,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Contact {
    id: u8,
    x: Option<i16>,
    y: Option<i16>,
    pressure: Option<u8>,
}

impl Contact {
    fn raw(&self) -> RawContact {
        RawContact {
            id: u32::from(self.id % 5),
            x: self.x.map(f64::from),
            y: self.y.map(f64::from),
            pressure: self.pressure.map(|p| f64::from(p) / 200.0),
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Step {
    Touch {
        phase: u8,
        gap_ms: u8,
        touches: Vec<Contact>,
        changed: Vec<Contact>,
    },
    Frame {
        gap_ms: u8,
    },
}

fuzz_target!(|steps: Vec<Step>| {
    let mut engine = GestureEngine::new(GestureConfig::default())
        .with_capabilities(Capabilities::all());
    let mut now = 0u64;
    let mut open = 0i64;
    let mut tally = |events: &[GestureEvent], engine: &GestureEngine| {
        for event in events {
            match event.kind() {
                GestureKind::SessionStart => open += 1,
                GestureKind::SessionEnd => open -= 1,
                GestureKind::Pinch => {
                    let zoom = engine.zoom();
                    assert!((0.5..=3.0).contains(&zoom), "zoom {zoom} out of bounds");
                }
                _ => {}
            }
        }
        assert!((0..=1).contains(&open), "sessions must not overlap");
    };

    for step in steps.iter().take(256) {
        match step {
            Step::Touch {
                phase,
                gap_ms,
                touches,
                changed,
            } => {
                now += u64::from(*gap_ms);
                let phase = match phase % 4 {
                    0 => TouchPhase::Start,
                    1 => TouchPhase::Move,
                    2 => TouchPhase::End,
                    _ => TouchPhase::Cancel,
                };
                let notification = TouchNotification::new(phase, Duration::from_millis(now))
                    .with_touches(touches.iter().take(6).map(Contact::raw))
                    .with_changed(changed.iter().take(6).map(Contact::raw));
                let events = engine.handle(&notification);
                tally(&events, &engine);
            }
            Step::Frame { gap_ms } => {
                now += u64::from(*gap_ms);
                let events = engine.tick(Duration::from_millis(now));
                tally(&events, &engine);
            }
        }
    }

    let events = engine.reset();
    tally(&events, &engine);
    assert_eq!(open, 0, "every session start needs an end");
});
