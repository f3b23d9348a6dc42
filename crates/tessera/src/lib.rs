//! Tessera: N-dimensional grid addressing, element storage and cell
//! decomposition.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Tessera sub-crates. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // A 16×16 grid of particles with a density and a velocity.
//! let layout = PropertyLayout::new(&[
//!     PropertyDef::scalar("rho"),
//!     PropertyDef::vector("vel", 2),
//! ])
//! .unwrap();
//! let rho = layout.id_of("rho").unwrap();
//!
//! let mut grid: Grid<SoaStore> = Grid::with_extents(&[16, 16], layout).unwrap();
//! grid.activate();
//!
//! // Mark the boundary ring: every shell of codimension 1 and 2.
//! let shape = grid.shape().clone();
//! for codim in 1..=2 {
//!     for shell in shape.shell_boxes(codim) {
//!         for key in shell.keys() {
//!             grid.set_scalar(rho, &key, 1.0).unwrap();
//!         }
//!     }
//! }
//! let marked = grid.iter().filter(|k| grid.scalar(rho, k) == Ok(1.0)).count();
//! assert_eq!(marked, 16 * 16 - 14 * 14);
//!
//! // Map a continuous position onto a padded cell grid of the same size.
//! let cells = CellDecomposer::new(&SpaceBox::unit(2).unwrap(), &[16, 16]).unwrap();
//! assert_eq!(cells.cell_key(&[0.0, 0.0]).unwrap(), GridKey::from([1, 1]));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Keys, property definitions, property sets, `GridError` |
//! | [`space`] | `tessera-space` | Shapes, iterators, hypercube shells, cell decomposer |
//! | [`grid`] | `tessera-grid` | `Grid`, AoS/SoA stores, element views, packing |
//!
//! # Features
//!
//! - `checked` (default): validate every key against the grid shape and
//!   report `GridError` values. Without it key checks compile away.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`tessera-core`).
///
/// [`types::GridKey`], [`types::PropertyDef`], [`types::PropertySet`] and
/// the [`types::GridError`] taxonomy.
pub use tessera_core as types;

/// Index spaces (`tessera-space`).
///
/// [`space::GridShape`] and its iterators, [`space::HyperCube`] shell
/// enumeration, and [`space::CellDecomposer`].
pub use tessera_space as space;

/// Grid containers (`tessera-grid`).
///
/// [`grid::Grid`] over [`grid::AosStore`] or [`grid::SoaStore`], plus the
/// [`grid::pack`](tessera_grid::pack()) serialization functions.
pub use tessera_grid as grid;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessera_core::{GridError, GridKey, PropertyDef, PropertyId, PropertyKind, PropertySet};

    // Space
    pub use tessera_space::{
        CellDecomposer, Comb, DecomposerConfig, Domain, GridShape, HyperCube, ShapeError,
        ShellBox, SpaceBox,
    };

    // Grid
    pub use tessera_grid::{
        AosStore, BackingStore, Element, Grid, GridIter, LayoutError, PackError, PropertyLayout,
        SoaStore,
    };
}
