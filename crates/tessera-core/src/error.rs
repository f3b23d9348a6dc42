//! The grid access error taxonomy.
//!
//! Every checked access path in the workspace reports misuse through
//! [`GridError`]. The set of variants is closed: out-of-range and negative
//! components are reported separately, and storage lifecycle mistakes
//! (never activated vs. released or swapped away) are distinguishable.

use std::error::Error;
use std::fmt;

/// Errors raised by checked key, element, and storage access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A key component is greater than or equal to the extent of its axis.
    OutOfBounds {
        /// Axis of the offending component.
        axis: usize,
        /// The offending component value.
        index: i32,
        /// Extent of that axis.
        extent: usize,
    },
    /// A key component is negative.
    NegativeIndex {
        /// Axis of the offending component.
        axis: usize,
        /// The offending component value.
        index: i32,
    },
    /// Storage was accessed before the container was activated.
    UninitializedStore,
    /// A key, element, or container does not match the shape or layout it
    /// is used against (dimensionality, source key of a cross-container
    /// copy, element layout).
    ShapeMismatch {
        /// What did not match.
        reason: String,
    },
    /// Storage was accessed after it was released, or through an iterator
    /// whose storage generation has since been replaced.
    UseAfterRelease {
        /// Generation recorded by the caller.
        held: u64,
        /// Current generation of the container.
        current: u64,
    },
}

impl GridError {
    /// Shorthand for a [`GridError::ShapeMismatch`] with a formatted reason.
    pub fn shape_mismatch(reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                axis,
                index,
                extent,
            } => {
                write!(
                    f,
                    "index {index} on axis {axis} out of bounds for extent {extent}"
                )
            }
            Self::NegativeIndex { axis, index } => {
                write!(f, "negative index {index} on axis {axis}")
            }
            Self::UninitializedStore => write!(f, "storage accessed before activation"),
            Self::ShapeMismatch { reason } => write!(f, "shape mismatch: {reason}"),
            Self::UseAfterRelease { held, current } => {
                write!(
                    f,
                    "storage generation {held} was released (current generation {current})"
                )
            }
        }
    }
}

impl Error for GridError {}
