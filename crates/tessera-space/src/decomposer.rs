//! Continuous-to-discrete position mapping with a guard ring of cells.

use crate::config::DecomposerConfig;
use crate::domain::{Domain, SpaceBox};
use crate::error::ShapeError;
use crate::shape::GridShape;
use log::debug;
use smallvec::SmallVec;
use tessera_core::{GridError, GridKey};

/// Maps positions inside a geometric domain onto a padded cell grid.
///
/// The cell grid has `cells[i]` cells on axis `i`, of which `padding` on
/// each side form a guard ring outside the domain. The domain itself is
/// split evenly over the remaining `cells[i] - 2 * padding` cells, so the
/// domain's low corner falls in cell `(padding, ..., padding)` and a
/// position just below `high` falls in cell `cells[i] - 1 - padding`.
///
/// Positions are mapped with `floor`, so coordinates on a cell boundary go
/// to the higher-indexed cell and coordinates slightly below `low` land in
/// the guard ring instead of being truncated into the domain.
///
/// # Examples
///
/// ```
/// use tessera_space::{CellDecomposer, SpaceBox};
///
/// let domain = SpaceBox::unit(2).unwrap();
/// let cd = CellDecomposer::new(&domain, &[18, 18]).unwrap();
/// assert_eq!(cd.cell_width(0), 1.0 / 16.0);
/// assert_eq!(cd.cell_id(&[0.0, 0.0]).unwrap(), cd.padding_offset());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CellDecomposer {
    domain: SpaceBox,
    grid: GridShape,
    widths: SmallVec<[f64; 4]>,
    padding: usize,
    padding_offset: usize,
}

impl CellDecomposer {
    /// Decompose `domain` into `cells` per axis with the default padding.
    pub fn new<D: Domain>(domain: &D, cells: &[usize]) -> Result<Self, ShapeError> {
        Self::with_config(domain, cells, DecomposerConfig::default())
    }

    /// Decompose `domain` into `cells` per axis.
    ///
    /// Returns `Err(ShapeError::InvalidDomain)` if the domain has a
    /// different dimensionality than `cells` or a non-positive extent, and
    /// `Err(ShapeError::InvalidRegion)` if some axis has no more than
    /// `2 * padding` cells.
    pub fn with_config<D: Domain>(
        domain: &D,
        cells: &[usize],
        config: DecomposerConfig,
    ) -> Result<Self, ShapeError> {
        if domain.dim() != cells.len() {
            return Err(ShapeError::InvalidDomain {
                reason: format!(
                    "{}D domain cannot be split by {}D cell counts",
                    domain.dim(),
                    cells.len()
                ),
            });
        }
        let low: Vec<f64> = (0..domain.dim()).map(|i| domain.low(i)).collect();
        let high: Vec<f64> = (0..domain.dim()).map(|i| domain.high(i)).collect();
        let domain = SpaceBox::new(&low, &high)?;

        let guard = config.guard_cells();
        if let Some(axis) = cells.iter().position(|&c| c <= guard) {
            return Err(ShapeError::InvalidRegion {
                reason: format!(
                    "axis {axis} has {} cells, need more than {guard} for padding {}",
                    cells[axis], config.padding
                ),
            });
        }
        let grid = GridShape::new(cells)?;
        let widths = cells
            .iter()
            .enumerate()
            .map(|(i, &c)| domain.width(i) / (c - guard) as f64)
            .collect();
        let padding_offset = grid.lin_id(&GridKey::splat(grid.ndim(), config.padding as i32));

        debug!(
            "cell decomposer: cells {:?}, padding {}, offset {}",
            cells, config.padding, padding_offset
        );
        Ok(Self {
            domain,
            grid,
            widths,
            padding: config.padding,
            padding_offset,
        })
    }

    /// Rebuild for a new domain and cell counts, keeping the padding.
    ///
    /// On error `self` is unchanged.
    pub fn set_dimensions<D: Domain>(
        &mut self,
        domain: &D,
        cells: &[usize],
    ) -> Result<(), ShapeError> {
        *self = Self::with_config(domain, cells, DecomposerConfig::new(self.padding))?;
        Ok(())
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.grid.ndim()
    }

    /// The padded cell grid.
    pub fn grid(&self) -> &GridShape {
        &self.grid
    }

    /// The decomposed domain.
    pub fn domain(&self) -> &SpaceBox {
        &self.domain
    }

    /// Guard ring width in cells.
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Linear id of the first interior cell (all components `padding`).
    pub fn padding_offset(&self) -> usize {
        self.padding_offset
    }

    /// Width of one cell on `axis`.
    pub fn cell_width(&self, axis: usize) -> f64 {
        self.widths[axis]
    }

    /// Cell key of `pos`, guard ring included.
    ///
    /// The key may lie outside the grid when `pos` is beyond the guard ring;
    /// [`Self::cell_id`] reports that case.
    pub fn cell_key(&self, pos: &[f64]) -> Result<GridKey, GridError> {
        self.key_with_shift(pos, self.padding as i32)
    }

    /// Linear id of the cell containing `pos`.
    ///
    /// Equals the unpadded cell id plus [`Self::padding_offset`]. Returns
    /// `NegativeIndex` or `OutOfBounds` when `pos` falls outside the guard
    /// ring, and `ShapeMismatch` for a position of the wrong dimensionality
    /// or with a non-finite coordinate.
    pub fn cell_id(&self, pos: &[f64]) -> Result<usize, GridError> {
        self.grid.checked_lin_id(&self.cell_key(pos)?)
    }

    /// Linear id for a position already expressed in the padded frame,
    /// whose origin is the outer corner of the guard ring.
    ///
    /// No padding offset is added.
    pub fn cell_id_padded(&self, pos: &[f64]) -> Result<usize, GridError> {
        self.grid.checked_lin_id(&self.key_with_shift(pos, 0)?)
    }

    /// Whether `key` names a cell inside the domain (not the guard ring).
    pub fn is_interior(&self, key: &GridKey) -> bool {
        let pad = self.padding as i32;
        self.grid.contains(key)
            && key
                .iter()
                .zip(self.grid.extents())
                .all(|(k, &e)| k >= pad && k < e as i32 - pad)
    }

    /// Geometric bounds of the cell `key`, guard cells included.
    pub fn cell_box(&self, key: &GridKey) -> Result<SpaceBox, GridError> {
        self.grid.check_key(key)?;
        let pad = self.padding as i32;
        let mut low = SmallVec::with_capacity(self.dim());
        let mut high = SmallVec::with_capacity(self.dim());
        for (axis, k) in key.iter().enumerate() {
            let lo = self.domain.low(axis) + (k - pad) as f64 * self.widths[axis];
            low.push(lo);
            high.push(lo + self.widths[axis]);
        }
        Ok(SpaceBox::from_corners(low, high))
    }

    fn key_with_shift(&self, pos: &[f64], shift: i32) -> Result<GridKey, GridError> {
        if pos.len() != self.dim() {
            return Err(GridError::shape_mismatch(format!(
                "expected {}D position, got {}D",
                self.dim(),
                pos.len()
            )));
        }
        pos.iter()
            .enumerate()
            .map(|(axis, &x)| {
                if !x.is_finite() {
                    return Err(GridError::shape_mismatch(format!(
                        "non-finite coordinate {x} on axis {axis}"
                    )));
                }
                let (low, high) = (self.domain.low(axis), self.domain.high(axis));
                let mut cell = ((x - low) / self.widths[axis]).floor();
                if (low..high).contains(&x) {
                    // Rounding in the division can push `high - ulp` one cell too far.
                    let interior = self.grid.extent(axis) - 2 * self.padding;
                    cell = cell.clamp(0.0, (interior - 1) as f64);
                }
                // `as` saturates, so far-away positions still fail the bounds check.
                Ok((cell as i32).saturating_add(shift))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn unit_square() -> CellDecomposer {
        CellDecomposer::new(&SpaceBox::unit(2).unwrap(), &[18, 18]).unwrap()
    }

    #[test]
    fn low_corner_maps_to_first_interior_cell() {
        let cd = unit_square();
        assert_eq!(cd.cell_key(&[0.0, 0.0]).unwrap(), GridKey::from([1, 1]));
        assert_eq!(cd.cell_id(&[0.0, 0.0]).unwrap(), 1 + 18);
        assert_eq!(cd.padding_offset(), 19);
    }

    #[test]
    fn just_below_high_maps_to_last_interior_cell() {
        let cd = unit_square();
        let x = 1.0 - 1e-9;
        assert_eq!(cd.cell_key(&[x, x]).unwrap(), GridKey::from([16, 16]));
        assert!(cd.is_interior(&GridKey::from([16, 16])));
        assert!(!cd.is_interior(&GridKey::from([17, 16])));
    }

    #[test]
    fn largest_position_below_high_stays_interior() {
        for interior in [3usize, 5, 7, 10] {
            for domain in [
                SpaceBox::unit(1).unwrap(),
                SpaceBox::new(&[0.1], &[0.7]).unwrap(),
            ] {
                let cd = CellDecomposer::new(&domain, &[interior + 2]).unwrap();
                let x = f64::from_bits(domain.high(0).to_bits() - 1);
                let key = cd.cell_key(&[x]).unwrap();
                assert_eq!(key, GridKey::from([interior as i32]), "interior {interior}");
                assert!(cd.is_interior(&key));
                assert_eq!(cd.cell_id_padded(&[x]).unwrap(), interior - 1);
            }
        }
    }

    #[test]
    fn just_below_low_maps_to_guard_ring() {
        let cd = unit_square();
        let key = cd.cell_key(&[-1e-9, 0.5]).unwrap();
        assert_eq!(key, GridKey::from([0, 9]));
        assert!(!cd.is_interior(&key));
        assert_eq!(cd.cell_id(&[-1e-9, 0.5]).unwrap(), 9 * 18);
    }

    #[test]
    fn beyond_guard_ring_is_an_error() {
        let cd = unit_square();
        let w = cd.cell_width(0);
        assert_eq!(
            cd.cell_id(&[-w - 1e-9, 0.5]),
            Err(GridError::NegativeIndex { axis: 0, index: -1 })
        );
        assert_eq!(
            cd.cell_id(&[0.5, 1.0 + w]),
            Err(GridError::OutOfBounds {
                axis: 1,
                index: 18,
                extent: 18
            })
        );
        assert!(matches!(
            cd.cell_id(&[0.5]),
            Err(GridError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            cd.cell_id(&[f64::NAN, 0.5]),
            Err(GridError::ShapeMismatch { .. })
        ));
        assert!(cd.cell_id(&[1e300, 0.5]).is_err());
    }

    #[test]
    fn boundary_coordinate_goes_to_higher_cell() {
        let cd = CellDecomposer::new(&SpaceBox::from_high(&[8.0]).unwrap(), &[10]).unwrap();
        assert_eq!(cd.cell_width(0), 1.0);
        assert_eq!(cd.cell_key(&[3.0]).unwrap(), GridKey::from([4]));
        assert_eq!(cd.cell_key(&[2.999]).unwrap(), GridKey::from([3]));
    }

    #[test]
    fn padded_frame_skips_offset() {
        let cd = unit_square();
        let w = cd.cell_width(0);
        let padded = [0.5 * w, 0.5 * w];
        assert_eq!(cd.cell_id_padded(&padded).unwrap(), 0);
        let inner = [0.0, 0.0];
        let shifted = [w, w];
        assert_eq!(
            cd.cell_id_padded(&shifted).unwrap(),
            cd.cell_id(&inner).unwrap()
        );
    }

    #[test]
    fn offset_domain_uses_low_corner() {
        let domain = SpaceBox::new(&[-2.0, 10.0], &[2.0, 14.0]).unwrap();
        let cd = CellDecomposer::new(&domain, &[6, 6]).unwrap();
        assert_eq!(cd.cell_width(1), 1.0);
        assert_eq!(cd.cell_key(&[-2.0, 10.0]).unwrap(), GridKey::from([1, 1]));
        assert_eq!(cd.cell_key(&[1.5, 13.5]).unwrap(), GridKey::from([4, 4]));
    }

    #[test]
    fn wider_padding_is_consistent() {
        let config = DecomposerConfig::new(2);
        let cd = CellDecomposer::with_config(&SpaceBox::unit(3).unwrap(), &[8, 9, 10], config)
            .unwrap();
        let pad_key = GridKey::from([2, 2, 2]);
        assert_eq!(cd.padding_offset(), cd.grid().lin_id(&pad_key));
        assert_eq!(cd.cell_key(&[0.0, 0.0, 0.0]).unwrap(), pad_key);
        assert_eq!(cd.cell_width(0), 1.0 / 4.0);
        let x = 1.0 - 1e-9;
        assert_eq!(cd.cell_key(&[x, x, x]).unwrap(), GridKey::from([5, 6, 7]));
        compliance::run_full_compliance(cd.grid());
    }

    #[test]
    fn rejects_too_few_cells_and_mismatched_domain() {
        let unit = SpaceBox::unit(2).unwrap();
        assert!(matches!(
            CellDecomposer::new(&unit, &[2, 5]),
            Err(ShapeError::InvalidRegion { .. })
        ));
        assert!(matches!(
            CellDecomposer::new(&unit, &[5, 5, 5]),
            Err(ShapeError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn set_dimensions_rebuilds_and_keeps_padding() {
        let mut cd = CellDecomposer::with_config(
            &SpaceBox::unit(2).unwrap(),
            &[8, 8],
            DecomposerConfig::new(2),
        )
        .unwrap();
        cd.set_dimensions(&SpaceBox::unit(3).unwrap(), &[6, 6, 6])
            .unwrap();
        assert_eq!(cd.dim(), 3);
        assert_eq!(cd.padding(), 2);
        assert_eq!(cd.cell_width(2), 0.5);

        let before = cd.clone();
        assert!(cd
            .set_dimensions(&SpaceBox::unit(1).unwrap(), &[4])
            .is_err());
        assert_eq!(cd, before);
    }

    #[test]
    fn cell_box_surrounds_cell_center() {
        let cd = unit_square();
        let b = cd.cell_box(&GridKey::from([1, 1])).unwrap();
        assert_eq!(b.low(0), 0.0);
        assert_eq!(b.high(0), cd.cell_width(0));
        let guard = cd.cell_box(&GridKey::from([0, 0])).unwrap();
        assert!(guard.high(1) <= 0.0);
        assert!(cd.cell_box(&GridKey::from([18, 0])).is_err());
    }

    proptest! {
        #[test]
        fn domain_positions_land_in_interior(
            x in 0.0f64..1.0,
            y in 0.0f64..1.0,
            z in 0.0f64..1.0,
        ) {
            let cd = CellDecomposer::new(&SpaceBox::unit(3).unwrap(), &[7, 9, 12]).unwrap();
            let pos = [x, y, z];
            let key = cd.cell_key(&pos).unwrap();
            prop_assert!(cd.is_interior(&key));
            let id = cd.cell_id(&pos).unwrap();
            prop_assert_eq!(cd.grid().inv_lin_id(id), key.clone());
            let b = cd.cell_box(&key).unwrap();
            for axis in 0..3 {
                prop_assert!(b.low(axis) <= pos[axis] + 1e-12);
                prop_assert!(pos[axis] < b.high(axis) + 1e-12);
            }
        }
    }
}
