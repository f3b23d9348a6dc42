//! Error types for shape and decomposer construction.

use std::fmt;

/// Errors arising from building shapes, sub-regions, or decomposers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// A shape was requested with zero axes.
    NoDimensions,
    /// An extent does not fit the `i32` key component range.
    DimensionTooLarge {
        /// Axis of the offending extent.
        axis: usize,
        /// The requested extent.
        value: usize,
        /// Largest accepted extent.
        max: usize,
    },
    /// The product of the extents (or one of the strides) overflows `usize`.
    SizeOverflow {
        /// The requested extents.
        extents: Vec<usize>,
    },
    /// A sub-region is not contained in the shape or is malformed.
    InvalidRegion {
        /// What went wrong.
        reason: String,
    },
    /// A geometric domain cannot be decomposed.
    InvalidDomain {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDimensions => write!(f, "shape must have at least one axis"),
            Self::DimensionTooLarge { axis, value, max } => {
                write!(f, "extent {value} on axis {axis} exceeds maximum {max}")
            }
            Self::SizeOverflow { extents } => {
                write!(f, "element count of extents {extents:?} overflows usize")
            }
            Self::InvalidRegion { reason } => write!(f, "invalid region: {reason}"),
            Self::InvalidDomain { reason } => write!(f, "invalid domain: {reason}"),
        }
    }
}

impl std::error::Error for ShapeError {}
