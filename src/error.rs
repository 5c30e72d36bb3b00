//! Error types of the cabinet core.
//!
//! Dimension problems are detected before anything is mutated, resource
//! failures come from the [`GeometryBackend`](crate::data_structures::drawable::GeometryBackend)
//! and an unknown panel name is a broken program, not a user error.

use std::fmt;

use thiserror::Error;

/// One of the three outer dimensions of the cabinet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Width, Axis::Height, Axis::Depth];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Height => "height",
            Axis::Depth => "depth",
        })
    }
}

/// Rejected cabinet dimensions or wall thickness.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DimensionError {
    #[error("{axis} must be a finite number, got {value}")]
    NonFinite { axis: Axis, value: f32 },

    #[error("{axis} of {value} must exceed twice the wall thickness ({minimum})")]
    TooSmall { axis: Axis, value: f32, minimum: f32 },

    #[error("wall thickness must be positive and finite, got {0}")]
    InvalidThickness(f32),
}

/// A panel name outside of the fixed five was referenced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown cabinet panel `{0}`")]
pub struct InvariantViolation(pub String);

/// The rendering backend could not allocate or free a geometry resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("failed to allocate geometry for {label}: {reason}")]
    Allocate { label: String, reason: String },

    #[error("failed to release geometry of {label}: {reason}")]
    Release { label: String, reason: String },

    #[error("failed to upload the transform of {label}: {reason}")]
    Upload { label: String, reason: String },
}

/// Everything a cabinet operation can fail with.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CabinetError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}
