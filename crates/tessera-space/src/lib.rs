//! Index spaces for Tessera grids.
//!
//! This crate owns everything that is pure addressing: the [`GridShape`]
//! dimension descriptor and its linearization, the lazy key iterators,
//! the hypercube combination enumerator used to split a box into
//! interior/face/edge/corner shells, and the [`CellDecomposer`] that maps
//! continuous positions onto the same address space.
//!
//! # Linearization
//!
//! Axis 0 varies fastest. For extents `E` the strides are
//! `S_i = E_0 * ... * E_{i-1}` and `lin_id(k) = sum_i k_i * S_i`.
//! [`GridKeyIter`] visits keys in exactly that order, so the n-th key it
//! yields has linear id `n`.
//!
//! # Shells
//!
//! [`HyperCube::combinations_r`] enumerates the codimension-k faces of a
//! box as [`Comb`] selectors; [`GridShape::shell_boxes`] turns each one
//! into a disjoint sub-box. Walking codimension `0..=ndim` visits every
//! key exactly once.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod decomposer;
pub mod domain;
pub mod error;
pub mod hypercube;
pub mod iter;
pub mod shape;
pub mod shell;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::DecomposerConfig;
pub use decomposer::CellDecomposer;
pub use domain::{Domain, SpaceBox};
pub use error::ShapeError;
pub use hypercube::{Comb, HyperCube};
pub use iter::{GridKeyIter, GridKeySubIter};
pub use shape::GridShape;
pub use shell::ShellBox;
