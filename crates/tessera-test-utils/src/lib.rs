//! Test fixtures and deterministic data generators for Tessera development.
//!
//! - [`point`]: the reference particle layout (position, scalar, vector,
//!   matrix) and helpers that fill a grid with values derived from each
//!   element's linear id, so any element can be checked independently.
//! - [`positions`]: seeded uniform positions inside a domain.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod point;
pub mod positions;

pub use point::{expected_point, fill_grid, point_layout, verify_grid};
pub use positions::uniform_positions;
