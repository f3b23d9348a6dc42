//! The [`GridShape`] dimension descriptor and key linearization.

use crate::error::ShapeError;
use crate::iter::{GridKeyIter, GridKeySubIter};
use smallvec::SmallVec;
use std::fmt;
use tessera_core::{GridError, GridKey};

/// Per-axis extents of an N-dimensional index space and their strides.
///
/// The shape is the single source of truth for element count and stride.
/// Keys are linearized with axis 0 fastest:
/// `lin_id(k) = k_0 + k_1 * E_0 + k_2 * E_0 * E_1 + ...`.
///
/// A shape with a zero extent on any axis is valid: it has size 0 and its
/// iterators are exhausted from the start.
///
/// # Examples
///
/// ```
/// use tessera_core::GridKey;
/// use tessera_space::GridShape;
///
/// let shape = GridShape::new(&[4, 3]).unwrap();
/// assert_eq!(shape.size(), 12);
/// assert_eq!(shape.strides(), &[1, 4]);
///
/// let key = GridKey::from([2, 1]);
/// assert_eq!(shape.lin_id(&key), 6);
/// assert_eq!(shape.inv_lin_id(6), key);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GridShape {
    extents: SmallVec<[usize; 4]>,
    strides: SmallVec<[usize; 4]>,
    size: usize,
}

impl GridShape {
    /// Largest accepted extent: key components are `i32`.
    pub const MAX_EXTENT: usize = i32::MAX as usize;

    /// Build a shape from per-axis extents.
    ///
    /// Returns `Err(ShapeError::NoDimensions)` for an empty slice,
    /// `Err(ShapeError::DimensionTooLarge)` if an extent exceeds
    /// [`Self::MAX_EXTENT`], or `Err(ShapeError::SizeOverflow)` if the
    /// element count or a stride overflows `usize`.
    pub fn new(extents: &[usize]) -> Result<Self, ShapeError> {
        if extents.is_empty() {
            return Err(ShapeError::NoDimensions);
        }
        let mut strides = SmallVec::with_capacity(extents.len());
        let mut acc: usize = 1;
        for (axis, &e) in extents.iter().enumerate() {
            if e > Self::MAX_EXTENT {
                return Err(ShapeError::DimensionTooLarge {
                    axis,
                    value: e,
                    max: Self::MAX_EXTENT,
                });
            }
            strides.push(acc);
            acc = acc.checked_mul(e).ok_or_else(|| ShapeError::SizeOverflow {
                extents: extents.to_vec(),
            })?;
        }
        Ok(Self {
            extents: SmallVec::from_slice(extents),
            strides,
            size: acc,
        })
    }

    /// Replace the extents (and strides) of this shape.
    ///
    /// The new descriptor is built first; on error `self` is unchanged.
    /// Storage sized from the old shape is never touched.
    pub fn set_dimensions(&mut self, extents: &[usize]) -> Result<(), ShapeError> {
        *self = Self::new(extents)?;
        Ok(())
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Total number of elements (product of the extents).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if some axis has extent 0.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Extent of `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.ndim()`.
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// All extents, axis 0 first.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Stride of `axis` in linear offsets.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.ndim()`.
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// All strides, axis 0 first (always `1`).
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Whether `key` has this shape's dimensionality and every component
    /// lies in `[0, extent)`.
    pub fn contains(&self, key: &GridKey) -> bool {
        key.ndim() == self.ndim()
            && key
                .iter()
                .zip(self.extents.iter())
                .all(|(k, &e)| k >= 0 && (k as usize) < e)
    }

    /// Linear offset of an in-range key.
    ///
    /// Out-of-range keys are a caller error: debug builds assert, release
    /// builds return an unspecified offset. Use [`Self::checked_lin_id`]
    /// when the key is untrusted.
    pub fn lin_id(&self, key: &GridKey) -> usize {
        debug_assert!(
            self.contains(key),
            "key {key} outside shape {:?}",
            self.extents.as_slice()
        );
        key.iter()
            .zip(self.strides.iter())
            .map(|(k, &s)| k as usize * s)
            .sum()
    }

    /// Linear offset of `key`, validating every component.
    ///
    /// Negative components report [`GridError::NegativeIndex`], components
    /// at or past the extent report [`GridError::OutOfBounds`], and a key of
    /// the wrong dimensionality reports [`GridError::ShapeMismatch`]. Axes
    /// are checked in order; the first failure wins.
    pub fn checked_lin_id(&self, key: &GridKey) -> Result<usize, GridError> {
        self.check_key(key)?;
        Ok(self.lin_id(key))
    }

    /// Validate `key` against this shape without computing its offset.
    pub fn check_key(&self, key: &GridKey) -> Result<(), GridError> {
        if key.ndim() != self.ndim() {
            return Err(GridError::shape_mismatch(format!(
                "expected {}D key, got {}D key {key}",
                self.ndim(),
                key.ndim()
            )));
        }
        for (axis, (k, &e)) in key.iter().zip(self.extents.iter()).enumerate() {
            if k < 0 {
                return Err(GridError::NegativeIndex { axis, index: k });
            }
            if k as usize >= e {
                return Err(GridError::OutOfBounds {
                    axis,
                    index: k,
                    extent: e,
                });
            }
        }
        Ok(())
    }

    /// Key of the element at linear `offset`; inverse of [`Self::lin_id`].
    ///
    /// Valid for `offset < self.size()`.
    pub fn inv_lin_id(&self, offset: usize) -> GridKey {
        debug_assert!(
            offset < self.size,
            "offset {offset} outside shape of size {}",
            self.size
        );
        self.extents
            .iter()
            .zip(self.strides.iter())
            .map(|(&e, &s)| if e == 0 { 0 } else { ((offset / s) % e) as i32 })
            .collect()
    }

    /// The last key of the shape (`extent - 1` on every axis).
    ///
    /// Components are `-1` on zero-extent axes.
    pub fn last_key(&self) -> GridKey {
        self.extents.iter().map(|&e| e as i32 - 1).collect()
    }

    /// Iterate over every key in linearization order.
    pub fn iter(&self) -> GridKeyIter {
        GridKeyIter::new(self)
    }

    /// Iterate over the keys of the inclusive box `[start, stop]`.
    ///
    /// Returns `Err(ShapeError::InvalidRegion)` unless both corners have
    /// this shape's dimensionality, lie inside the shape, and satisfy
    /// `start <= stop` on every axis.
    pub fn sub_iter(&self, start: &GridKey, stop: &GridKey) -> Result<GridKeySubIter, ShapeError> {
        GridKeySubIter::new(self, start, stop)
    }
}

impl fmt::Debug for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridShape")
            .field("extents", &self.extents.as_slice())
            .field("strides", &self.strides.as_slice())
            .field("size", &self.size)
            .finish()
    }
}
