#![forbid(unsafe_code)]

//! JSON input parser for browser-encoded touch, pointer and sensor events.
//!
//! The JS side serializes each DOM event it forwards into a small JSON
//! object tagged by `kind`:
//!
//! | kind          | fields                                                         |
//! |---------------|----------------------------------------------------------------|
//! | `touch`       | `phase` (start/move/end/cancel), `t`?, `touches`, `changed`    |
//! | `pointer`     | `phase` (down/move/up/cancel), `id`, `x`, `y`, `pressure`?, `t`? |
//! | `motion`      | `x`, `y`, `z` (accelerationIncludingGravity), `t`?              |
//! | `orientation` | `alpha`, `beta`, `gamma`, `angle`                              |
//!
//! Times are milliseconds. A contact may omit a coordinate; such contacts are
//! passed through and dropped later by the sample normalizer, so one bad
//! contact never discards the whole notification.

use std::time::Duration;

use gesture_core::sample::{RawContact, TouchPhase};
use gesture_core::sensor::OrientationSample;
use serde::Deserialize;
use thiserror::Error;

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(String),
    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Phase value not valid for the input kind.
    #[error("unknown phase: {0}")]
    UnknownPhase(String),
    /// Unrecognized `kind` tag.
    #[error("unknown input kind: {0}")]
    UnknownKind(String),
}

/// Pointer Events phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerPhase {
    /// Equivalent touch phase.
    #[must_use]
    pub const fn touch_phase(self) -> TouchPhase {
        match self {
            Self::Down => TouchPhase::Start,
            Self::Move => TouchPhase::Move,
            Self::Up => TouchPhase::End,
            Self::Cancel => TouchPhase::Cancel,
        }
    }
}

/// A decoded host input.
#[derive(Debug, Clone, PartialEq)]
pub enum HostInput {
    Touch {
        phase: TouchPhase,
        t: Option<Duration>,
        touches: Vec<RawContact>,
        changed: Vec<RawContact>,
    },
    Pointer {
        phase: PointerPhase,
        t: Option<Duration>,
        contact: RawContact,
    },
    Motion {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        t: Option<Duration>,
    },
    Orientation(OrientationSample),
}

#[derive(Debug, Deserialize)]
struct RawTouch {
    id: u32,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default, alias = "pressure")]
    force: Option<f64>,
}

impl From<RawTouch> for RawContact {
    fn from(raw: RawTouch) -> Self {
        Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            pressure: raw.force,
        }
    }
}

/// Internal deserialization target covering every kind.
#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    t: Option<f64>,
    #[serde(default)]
    touches: Vec<RawTouch>,
    #[serde(default)]
    changed: Vec<RawTouch>,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    z: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
    #[serde(default)]
    alpha: Option<f64>,
    #[serde(default)]
    beta: Option<f64>,
    #[serde(default)]
    gamma: Option<f64>,
    #[serde(default)]
    angle: Option<i32>,
}

/// Parse one JSON-encoded host input.
pub fn parse_host_input(json: &str) -> Result<HostInput, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "touch" => parse_touch(raw),
        "pointer" => parse_pointer(raw),
        "motion" => Ok(HostInput::Motion {
            x: raw.x,
            y: raw.y,
            z: raw.z,
            t: parse_time(raw.t),
        }),
        "orientation" => Ok(HostInput::Orientation(OrientationSample {
            alpha: raw.alpha,
            beta: raw.beta,
            gamma: raw.gamma,
            screen_angle: raw.angle.unwrap_or(0),
        })),
        other => Err(InputParseError::UnknownKind(other.to_owned())),
    }
}

fn parse_touch(raw: RawInput) -> Result<HostInput, InputParseError> {
    let phase = raw.phase.ok_or(InputParseError::MissingField("phase"))?;
    let phase = match phase.as_str() {
        "start" => TouchPhase::Start,
        "move" => TouchPhase::Move,
        "end" => TouchPhase::End,
        "cancel" => TouchPhase::Cancel,
        _ => return Err(InputParseError::UnknownPhase(phase)),
    };
    Ok(HostInput::Touch {
        phase,
        t: parse_time(raw.t),
        touches: raw.touches.into_iter().map(RawContact::from).collect(),
        changed: raw.changed.into_iter().map(RawContact::from).collect(),
    })
}

fn parse_pointer(raw: RawInput) -> Result<HostInput, InputParseError> {
    let phase = raw.phase.ok_or(InputParseError::MissingField("phase"))?;
    let phase = match phase.as_str() {
        "down" => PointerPhase::Down,
        "move" => PointerPhase::Move,
        "up" => PointerPhase::Up,
        "cancel" => PointerPhase::Cancel,
        _ => return Err(InputParseError::UnknownPhase(phase)),
    };
    let id = raw.id.ok_or(InputParseError::MissingField("id"))?;
    Ok(HostInput::Pointer {
        phase,
        t: parse_time(raw.t),
        contact: RawContact {
            id,
            x: raw.x,
            y: raw.y,
            pressure: raw.pressure,
        },
    })
}

fn parse_time(ms: Option<f64>) -> Option<Duration> {
    ms.and_then(millis)
}

/// Milliseconds to `Duration`. Negative times clamp to zero, times beyond
/// the `Duration` range saturate; non-finite times are treated as absent.
pub(crate) fn millis(ms: f64) -> Option<Duration> {
    if !ms.is_finite() {
        return None;
    }
    Some(Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).unwrap_or(Duration::MAX))
}
