//! Axis-aligned geometric domains.

use crate::error::ShapeError;
use smallvec::SmallVec;

/// An axis-aligned box in continuous space.
///
/// Implementors report their lower and upper corner per axis. A
/// [`CellDecomposer`](crate::CellDecomposer) reads these once at
/// construction and keeps its own copy.
pub trait Domain {
    /// Number of axes.
    fn dim(&self) -> usize;

    /// Lower bound on `axis`.
    fn low(&self, axis: usize) -> f64;

    /// Upper bound on `axis`.
    fn high(&self, axis: usize) -> f64;
}

/// The minimal concrete [`Domain`]: two corners.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceBox {
    low: SmallVec<[f64; 4]>,
    high: SmallVec<[f64; 4]>,
}

impl SpaceBox {
    /// Build a box from its corners.
    ///
    /// Returns `Err(ShapeError::InvalidDomain)` if the corners differ in
    /// length, are empty, contain a non-finite value, or `high <= low` on
    /// some axis.
    pub fn new(low: &[f64], high: &[f64]) -> Result<Self, ShapeError> {
        if low.is_empty() || low.len() != high.len() {
            return Err(ShapeError::InvalidDomain {
                reason: format!(
                    "corner lengths {} and {} must match and be non-zero",
                    low.len(),
                    high.len()
                ),
            });
        }
        for (axis, (&l, &h)) in low.iter().zip(high).enumerate() {
            if !l.is_finite() || !h.is_finite() {
                return Err(ShapeError::InvalidDomain {
                    reason: format!("non-finite bound on axis {axis}"),
                });
            }
            if h <= l {
                return Err(ShapeError::InvalidDomain {
                    reason: format!("high {h} <= low {l} on axis {axis}"),
                });
            }
        }
        Ok(Self {
            low: SmallVec::from_slice(low),
            high: SmallVec::from_slice(high),
        })
    }

    /// Box anchored at the origin: `[0, high_i]` on every axis.
    pub fn from_high(high: &[f64]) -> Result<Self, ShapeError> {
        Self::new(&vec![0.0; high.len()], high)
    }

    /// The unit box `[0, 1]^dim`.
    pub fn unit(dim: usize) -> Result<Self, ShapeError> {
        Self::from_high(&vec![1.0; dim])
    }

    /// Build from corners already known to satisfy `low < high`.
    pub(crate) fn from_corners(low: SmallVec<[f64; 4]>, high: SmallVec<[f64; 4]>) -> Self {
        Self { low, high }
    }

    /// Width of the box on `axis`.
    pub fn width(&self, axis: usize) -> f64 {
        self.high[axis] - self.low[axis]
    }

    /// Whether `pos` lies in the half-open box `[low, high)`.
    pub fn contains(&self, pos: &[f64]) -> bool {
        pos.len() == self.dim()
            && pos
                .iter()
                .enumerate()
                .all(|(i, &x)| self.low[i] <= x && x < self.high[i])
    }
}

impl Domain for SpaceBox {
    fn dim(&self) -> usize {
        self.low.len()
    }

    fn low(&self, axis: usize) -> f64 {
        self.low[axis]
    }

    fn high(&self, axis: usize) -> f64 {
        self.high[axis]
    }
}
