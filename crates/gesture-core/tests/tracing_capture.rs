//! Structured log output of the engine, captured through a registry layer.
//!
//! Run with: `cargo test -p gesture-core --features tracing --test tracing_capture`

#![cfg(feature = "tracing")]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gesture_core::{GestureConfig, GestureEngine, RawContact, TouchNotification, TouchPhase};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

#[derive(Clone, Default)]
struct EventCapture(Arc<Mutex<Vec<CapturedEvent>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    let events = capture.0.lock().unwrap().clone();
    events
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn disabled_sensors_are_reported_at_info() {
    let events = with_captured_tracing(|| {
        let _engine = GestureEngine::new(GestureConfig::default());
    });
    let disabled: Vec<_> = events
        .iter()
        .filter(|e| e.message() == "ambient detector disabled")
        .collect();
    // Default capabilities cover neither motion nor orientation.
    assert_eq!(disabled.len(), 2);
    assert!(disabled.iter().all(|e| e.level == tracing::Level::INFO));
}

#[test]
fn session_lifecycle_is_logged_with_fields() {
    let events = with_captured_tracing(|| {
        let mut engine = GestureEngine::new(GestureConfig::default());
        engine.handle(
            &TouchNotification::new(TouchPhase::Start, ms(0))
                .with_touches([RawContact::at(1, 10.0, 10.0)]),
        );
        engine.handle(
            &TouchNotification::new(TouchPhase::End, ms(40))
                .with_changed([RawContact::at(1, 10.0, 10.0)]),
        );
    });

    let started = events
        .iter()
        .find(|e| e.message() == "session started")
        .expect("session started");
    assert!(started.fields.contains_key("session"));

    let ended = events
        .iter()
        .find(|e| e.message() == "session ended")
        .expect("session ended");
    assert_eq!(ended.level, tracing::Level::DEBUG);
    assert_eq!(ended.fields.get("max_contacts").map(String::as_str), Some("1"));
    assert_eq!(ended.fields.get("cancelled").map(String::as_str), Some("false"));
}

#[test]
fn malformed_contact_is_logged_not_fatal() {
    let events = with_captured_tracing(|| {
        let mut engine = GestureEngine::new(GestureConfig::default());
        engine.handle(&TouchNotification::new(TouchPhase::Start, ms(0)).with_touches([
            RawContact {
                id: 3,
                x: None,
                y: Some(1.0),
                pressure: None,
            },
        ]));
        assert!(!engine.is_session_active());
    });
    let dropped = events
        .iter()
        .find(|e| e.message() == "dropped malformed contact")
        .expect("drop logged");
    assert!(dropped.fields["error"].contains("missing its x coordinate"));
}
