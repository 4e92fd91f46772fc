#![forbid(unsafe_code)]

//! Internal error types.
//!
//! None of these ever reach gesture consumers. The engine recovers from each
//! of them locally: a rejected sample is dropped, a denied sensor disables
//! its detector. They exist so the recovery paths can be logged and tested.

use thiserror::Error;

use crate::sample::PointerId;

/// Coordinate axis named in [`SampleError::MissingCoordinate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Why a raw contact could not be turned into a [`PointerSample`](crate::sample::PointerSample).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("contact {id} is missing its {axis} coordinate")]
    MissingCoordinate { id: PointerId, axis: Axis },

    #[error("contact {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: PointerId },

    #[error("contact {id} reported a non-finite pressure")]
    NonFinitePressure { id: PointerId },
}

/// Ambient sensor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Motion,
    Orientation,
}

impl core::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Motion => "device motion",
            Self::Orientation => "device orientation",
        })
    }
}

/// Why an ambient sensor detector could not be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("{0} permission denied")]
    PermissionDenied(SensorKind),

    #[error("{0} is not supported on this device")]
    Unsupported(SensorKind),
}
