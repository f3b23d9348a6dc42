//! Grid containers for Tessera.
//!
//! A [`Grid`] pairs a [`GridShape`](tessera_space::GridShape) with a
//! [`PropertyLayout`] and a [`BackingStore`]. The store decides the memory
//! layout while the grid owns addressing, bounds checks, and lifecycle:
//!
//! ```text
//! Grid<S>
//! ├── GridShape       extents, strides, linearization
//! ├── PropertyLayout  PropertyId → component range (shared via Arc)
//! └── StoreState<S>   Unallocated | Active(S) | Released
//!     ├── AosStore    element-contiguous Vec<f32>
//!     └── SoaStore    one Vec<f32> per property
//! ```
//!
//! # Checked access
//!
//! The `checked` feature (default) validates every key and reports
//! [`GridError`](tessera_core::GridError) values. Disabling it removes the
//! key checks; store lifecycle checks remain.
//!
//! # Packing
//!
//! The [`pack`](mod@pack) module serializes the properties of an iterator's
//! keys into a flat little-endian `f32` byte stream and back.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aos;
pub mod element;
pub mod error;
pub mod grid;
pub mod iter;
pub mod layout;
pub mod pack;
pub mod soa;
pub mod store;

pub use aos::AosStore;
pub use element::{Element, ElementMut, ElementRef};
pub use error::{LayoutError, PackError};
pub use grid::Grid;
pub use iter::{GridIter, StoreStamp};
pub use layout::PropertyLayout;
pub use pack::{pack, pack_request, unpack, PackBuffer, PackStat, UnpackBuffer};
pub use soa::SoaStore;
pub use store::BackingStore;
