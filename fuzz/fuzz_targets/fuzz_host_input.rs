#![no_main]

use gesture_web::WebGestureHost;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 8192 {
        return;
    }

    // One JSON input per line; undecodable lines must be rejected, never panic.
    let mut host = WebGestureHost::new();
    for (i, line) in text.lines().enumerate() {
        let _ = host.push_input_json(line);
        if i % 4 == 3 {
            host.animation_frame(i as f64 * 16.0);
        }
    }

    let json = host.drain_events_json();
    assert!(json.starts_with('['), "events must encode as an array");
    let _ = host.drain_vibrations();
});
