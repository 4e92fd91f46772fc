//! End-to-end tests driving `WebGestureHost` with the JSON the page sends.

#![forbid(unsafe_code)]

use gesture_core::{GestureEvent, SwipeDirection};
use gesture_web::{InputParseError, WebGestureHost};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn push(host: &mut WebGestureHost, json: &str) -> usize {
    host.push_input_json(json).expect("valid input")
}

fn drained_types(host: &mut WebGestureHost) -> Vec<String> {
    let json = host.drain_events_json();
    let events: Vec<Value> = serde_json::from_str(&json).expect("array of events");
    events
        .iter()
        .map(|e| e["type"].as_str().expect("tagged").to_owned())
        .collect()
}

// ── Touch path ──────────────────────────────────────────────────────────

#[test]
fn touch_tap_reported_after_animation_frame() {
    let mut host = WebGestureHost::new();
    push(
        &mut host,
        r#"{"kind":"touch","phase":"start","t":0,"touches":[{"id":1,"x":100,"y":100}]}"#,
    );
    push(
        &mut host,
        r#"{"kind":"touch","phase":"end","t":60,"touches":[],"changed":[{"id":1,"x":101,"y":100}]}"#,
    );
    assert_eq!(drained_types(&mut host), vec!["session_start", "session_end"]);

    // Still inside the finalize debounce.
    assert_eq!(host.animation_frame(200.0), 0);
    assert_eq!(host.animation_frame(400.0), 1);
    let json = host.drain_events_json();
    let events: Vec<Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "tap");
    assert!(events[0]["position"]["x"].is_number());
}

#[test]
fn contact_without_coordinates_is_dropped_not_fatal() {
    let mut host = WebGestureHost::new();
    push(
        &mut host,
        r#"{"kind":"touch","phase":"start","t":0,"touches":[{"id":1,"y":100},{"id":2,"x":5,"y":5}]}"#,
    );
    assert_eq!(host.engine().contacts().len(), 1);
    assert_eq!(host.engine().normalizer_stats().dropped_samples, 1);
}

#[test]
fn drained_queue_is_empty_json_array() {
    let mut host = WebGestureHost::new();
    assert_eq!(host.drain_events_json(), "[]");
}

// ── Pointer path ────────────────────────────────────────────────────────

#[test]
fn pointer_flick_becomes_swipe() {
    let mut host = WebGestureHost::new();
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"down","id":1,"x":100,"y":100,"t":0}"#,
    );
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"move","id":1,"x":200,"y":100,"t":50}"#,
    );
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"up","id":1,"x":200,"y":100,"t":100}"#,
    );
    let events: Vec<GestureEvent> = host.drain_events().collect();
    let swipe = events
        .iter()
        .find_map(|e| match e {
            GestureEvent::Swipe(s) => Some(*s),
            _ => None,
        })
        .expect("swipe");
    assert_eq!(swipe.direction, SwipeDirection::Right);
    assert!(matches!(
        events.last(),
        Some(GestureEvent::SessionEnd {
            max_contacts: 1,
            cancelled: false
        })
    ));
    assert_eq!(host.pointers_down(), 0);
}

#[test]
fn two_pointers_pinch() {
    let mut host = WebGestureHost::new();
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"down","id":1,"x":100,"y":100,"t":0}"#,
    );
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"down","id":2,"x":200,"y":100,"t":5}"#,
    );
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"move","id":2,"x":300,"y":100,"t":30}"#,
    );
    let types = drained_types(&mut host);
    assert_eq!(types.first().map(String::as_str), Some("session_start"));
    assert!(types.iter().any(|t| t == "pinch"), "{types:?}");
    assert!(host.engine().zoom() > 1.0);

    push(
        &mut host,
        r#"{"kind":"pointer","phase":"up","id":2,"x":300,"y":100,"t":60}"#,
    );
    assert!(host.engine().is_session_active());
    push(
        &mut host,
        r#"{"kind":"pointer","phase":"up","id":1,"x":100,"y":100,"t":70}"#,
    );
    assert!(!host.engine().is_session_active());
    assert_eq!(drained_types(&mut host).last().map(String::as_str), Some("session_end"));
}

// ── Errors ──────────────────────────────────────────────────────────────

#[test]
fn undecodable_input_leaves_host_untouched() {
    let mut host = WebGestureHost::new();
    assert!(matches!(
        host.push_input_json("{"),
        Err(InputParseError::Json(_))
    ));
    assert_eq!(
        host.push_input_json(r#"{"kind":"keyboard"}"#),
        Err(InputParseError::UnknownKind("keyboard".into()))
    );
    assert!(!host.engine().is_session_active());
    assert_eq!(host.drain_events().count(), 0);
}

#[test]
fn out_of_range_timestamps_saturate_the_clock() {
    let mut host = WebGestureHost::new();
    push(
        &mut host,
        r#"{"kind":"touch","phase":"start","t":1e300,"touches":[{"id":1,"x":10,"y":10}]}"#,
    );
    assert_eq!(host.now(), std::time::Duration::MAX);
    host.animation_frame(1e300);
    host.animation_frame(f64::MAX);
    push(
        &mut host,
        r#"{"kind":"touch","phase":"cancel","t":1e300,"touches":[],"changed":[{"id":1,"x":10,"y":10}]}"#,
    );
    assert!(!host.engine().is_session_active());
}

// ── Sensors ─────────────────────────────────────────────────────────────

#[test]
fn orientation_needs_capability() {
    let flip = r#"{"kind":"orientation","alpha":0,"beta":0,"gamma":0,"angle":90}"#;

    let mut host = WebGestureHost::new();
    assert_eq!(push(&mut host, flip), 0);

    let mut host = WebGestureHost::new()
        .with_capabilities(gesture_core::Capabilities::DEVICE_ORIENTATION);
    assert_eq!(push(&mut host, flip), 1);
    let json = host.drain_events_json();
    let events: Vec<Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(events[0]["type"], "orientation");
    assert_eq!(events[0]["is_portrait"], false);
}

#[test]
fn shake_through_motion_inputs() {
    let mut host =
        WebGestureHost::new().with_capabilities(gesture_core::Capabilities::DEVICE_MOTION);
    push(&mut host, r#"{"kind":"motion","x":0,"y":0,"z":9.8,"t":0}"#);
    push(&mut host, r#"{"kind":"motion","x":20,"y":0,"z":9.8,"t":16}"#);
    assert_eq!(drained_types(&mut host), vec!["shake"]);
}
