//! Layout and serialization error types.

use std::error::Error;
use std::fmt;

use tessera_core::GridError;

/// Errors that can occur while building a [`PropertyLayout`](crate::PropertyLayout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Two properties share a name.
    DuplicateProperty {
        /// The repeated name.
        name: String,
    },
    /// A property has zero components (e.g. a 0-dimensional vector).
    EmptyProperty {
        /// The offending property.
        name: String,
    },
    /// The layout declares no properties.
    EmptyLayout,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProperty { name } => write!(f, "duplicate property '{name}'"),
            Self::EmptyProperty { name } => {
                write!(f, "property '{name}' has no components")
            }
            Self::EmptyLayout => write!(f, "layout must declare at least one property"),
        }
    }
}

impl Error for LayoutError {}

/// Errors that can occur while packing or unpacking grid data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackError {
    /// The grid rejected the access (stale iterator, inactive store,
    /// invalid key, unknown property).
    Grid(GridError),
    /// The pack buffer cannot hold the requested bytes.
    BufferOverflow {
        /// Bytes the operation needs.
        requested: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// The unpack buffer ends before the requested bytes.
    BufferUnderflow {
        /// Bytes the operation needs.
        requested: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid access failed: {e}"),
            Self::BufferOverflow {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "pack buffer overflow: requested {requested} bytes, {remaining} remaining"
                )
            }
            Self::BufferUnderflow {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "unpack buffer underflow: requested {requested} bytes, {remaining} remaining"
                )
            }
        }
    }
}

impl Error for PackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for PackError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
