//! Disjoint interior/boundary shells of a shape.
//!
//! Each [`Comb`] selects one sub-box of the shape: `-1` pins an axis to
//! index 0, `+1` pins it to `extent - 1`, and `0` spans `[1, extent - 2]`.
//! Boxes that would be empty or would overlap a lower-codimension box on a
//! short axis are dropped, so the boxes of codimension `0..=ndim` tile the
//! shape exactly once for any extents.

use crate::hypercube::{Comb, HyperCube};
use crate::iter::GridKeySubIter;
use crate::shape::GridShape;
use tessera_core::GridKey;

/// One shell of a shape: the inclusive box a [`Comb`] selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellBox {
    start: GridKey,
    stop: GridKey,
    comb: Comb,
    shape: GridShape,
}

impl ShellBox {
    /// The sub-box of `shape` selected by `comb`.
    ///
    /// Returns `None` when the box is empty: some axis has extent 0, a `0`
    /// selector sits on an axis shorter than 3, or a `+1` selector sits on
    /// an axis of extent 1 (index 0 already belongs to `-1`).
    ///
    /// # Panics
    ///
    /// Panics if `comb` and `shape` differ in dimensionality.
    pub fn from_comb(shape: &GridShape, comb: &Comb) -> Option<Self> {
        assert_eq!(
            comb.dim(),
            shape.ndim(),
            "comb {comb} does not match {}D shape",
            shape.ndim()
        );
        let mut start = GridKey::zero(shape.ndim());
        let mut stop = GridKey::zero(shape.ndim());
        for axis in 0..shape.ndim() {
            let e = shape.extent(axis) as i32;
            let (lo, hi) = match comb.get(axis) {
                -1 => (0, 0),
                1 => (e - 1, e - 1),
                _ => (1, e - 2),
            };
            if e == 0 || lo > hi || (comb.get(axis) == 1 && e == 1) {
                return None;
            }
            start[axis] = lo;
            stop[axis] = hi;
        }
        Some(Self {
            start,
            stop,
            comb: comb.clone(),
            shape: shape.clone(),
        })
    }

    /// Lower corner (inclusive).
    pub fn start(&self) -> &GridKey {
        &self.start
    }

    /// Upper corner (inclusive).
    pub fn stop(&self) -> &GridKey {
        &self.stop
    }

    /// The selector that produced this box.
    pub fn comb(&self) -> &Comb {
        &self.comb
    }

    /// Number of keys in the box.
    pub fn len(&self) -> usize {
        self.start
            .iter()
            .zip(self.stop.iter())
            .map(|(a, b)| (b - a + 1) as usize)
            .product()
    }

    /// Always `false`: empty boxes are never constructed.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the keys of this box in linearization order.
    pub fn keys(&self) -> GridKeySubIter {
        GridKeySubIter::from_validated(&self.shape, self.start.clone(), self.stop.clone())
    }
}

impl GridShape {
    /// The non-empty shells of codimension `codim`, in
    /// [`HyperCube::combinations_r`] order.
    ///
    /// `codim == 0` is the interior, `codim == ndim` the corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_space::GridShape;
    ///
    /// let shape = GridShape::new(&[4, 4]).unwrap();
    /// let total: usize = (0..=2)
    ///     .flat_map(|k| shape.shell_boxes(k))
    ///     .map(|b| b.len())
    ///     .sum();
    /// assert_eq!(total, 16);
    /// ```
    pub fn shell_boxes(&self, codim: usize) -> Vec<ShellBox> {
        HyperCube::combinations_r(self.ndim(), codim)
            .iter()
            .filter_map(|comb| ShellBox::from_comb(self, comb))
            .collect()
    }
}
