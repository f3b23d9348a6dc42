//! Benchmark profiles for the Tessera grid framework.
//!
//! - [`reference_grid`]: 64×64×64 point grid (262K elements), filled
//! - [`stress_extents`]: 128×128×128 extents for sweep stress tests
//! - [`reference_decomposer`]: unit cube split into 34³ padded cells

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use tessera_grid::{BackingStore, Grid};
use tessera_space::{CellDecomposer, ShapeError, SpaceBox};
use tessera_test_utils::{fill_grid, point_layout};

/// Extents of the reference profile.
pub const REFERENCE_EXTENTS: [usize; 3] = [64, 64, 64];

/// Build the reference profile: an active, filled 64³ point grid.
pub fn reference_grid<S: BackingStore>() -> Result<Grid<S>, Box<dyn Error>> {
    let mut g = Grid::with_extents(&REFERENCE_EXTENTS, point_layout())?;
    g.activate();
    fill_grid(&mut g)?;
    Ok(g)
}

/// Extents of the stress profile (~2M elements).
pub fn stress_extents() -> [usize; 3] {
    [128, 128, 128]
}

/// Unit cube decomposed into 32 interior cells per axis plus a guard ring.
pub fn reference_decomposer() -> Result<CellDecomposer, ShapeError> {
    CellDecomposer::new(&SpaceBox::unit(3)?, &[34, 34, 34])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_grid::{AosStore, SoaStore};
    use tessera_test_utils::verify_grid;

    #[test]
    fn reference_grid_is_filled() {
        let g: Grid<AosStore> = reference_grid().unwrap();
        assert_eq!(g.size(), 64 * 64 * 64);
        assert!(verify_grid(&g).unwrap());
        let s: Grid<SoaStore> = reference_grid().unwrap();
        assert!(s.is_active());
    }

    #[test]
    fn reference_decomposer_has_guard_ring() {
        let cd = reference_decomposer().unwrap();
        assert_eq!(cd.padding(), 1);
        assert_eq!(cd.grid().size(), 34 * 34 * 34);
        assert_eq!(stress_extents().iter().product::<usize>(), 1 << 21);
    }
}
