//! Lazy key iterators over a full shape or an inclusive sub-box.
//!
//! Both iterators carry their own copy of the bounds they walk, so they do
//! not borrow the shape they were created from. They yield owned keys in
//! linearization order (axis 0 fastest), can be inspected without
//! advancing via `peek`, and can be rewound with `reset`.

use crate::error::ShapeError;
use crate::shape::GridShape;
use smallvec::SmallVec;
use std::iter::FusedIterator;
use tessera_core::GridKey;

/// Advance `key` by one position inside the inclusive box `[lo, hi]`.
///
/// Increments axis 0; on overflow resets it to `lo` and carries into the
/// next axis. Returns `false` once the slowest axis would overflow.
fn step_within(key: &mut GridKey, lo: &GridKey, hi: &GridKey) -> bool {
    for axis in 0..key.ndim() {
        if key[axis] < hi[axis] {
            key[axis] += 1;
            return true;
        }
        key[axis] = lo[axis];
    }
    false
}

/// Iterator over every key of a [`GridShape`], in linearization order.
///
/// The n-th key yielded has `lin_id == n`. A shape with a zero extent
/// produces no keys.
///
/// # Examples
///
/// ```
/// use tessera_space::GridShape;
///
/// let shape = GridShape::new(&[2, 2]).unwrap();
/// let keys: Vec<Vec<i32>> = shape.iter().map(|k| k.as_slice().to_vec()).collect();
/// assert_eq!(keys, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct GridKeyIter {
    origin: GridKey,
    last: GridKey,
    current: Option<GridKey>,
    size: usize,
    remaining: usize,
}

impl GridKeyIter {
    /// Start iterating over `shape` at the all-zero key.
    pub fn new(shape: &GridShape) -> Self {
        let mut it = Self {
            origin: GridKey::zero(shape.ndim()),
            last: shape.last_key(),
            current: None,
            size: shape.size(),
            remaining: 0,
        };
        it.reset();
        it
    }

    /// Rewind to the first key.
    pub fn reset(&mut self) {
        self.current = (self.size > 0).then(|| self.origin.clone());
        self.remaining = self.size;
    }

    /// The key the next call to `next` will return, without advancing.
    pub fn peek(&self) -> Option<&GridKey> {
        self.current.as_ref()
    }

    /// Whether at least one key remains.
    pub fn has_next(&self) -> bool {
        self.current.is_some()
    }
}

impl Iterator for GridKeyIter {
    type Item = GridKey;

    fn next(&mut self) -> Option<GridKey> {
        let key = self.current.take()?;
        let mut succ = key.clone();
        if step_within(&mut succ, &self.origin, &self.last) {
            self.current = Some(succ);
        }
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridKeyIter {}

impl FusedIterator for GridKeyIter {}

/// Iterator over the keys of an inclusive box `[start, stop]` of a shape.
///
/// Yields `prod(stop_i - start_i + 1)` keys in the same relative order the
/// full iterator would visit them.
#[derive(Clone, Debug)]
pub struct GridKeySubIter {
    start: GridKey,
    stop: GridKey,
    strides: SmallVec<[usize; 4]>,
    current: Option<GridKey>,
    count: usize,
    remaining: usize,
}

impl GridKeySubIter {
    /// Iterate over the box `[start, stop]` of `shape`.
    ///
    /// Returns `Err(ShapeError::InvalidRegion)` unless both corners have the
    /// shape's dimensionality, lie inside it, and `start <= stop` per axis.
    pub fn new(shape: &GridShape, start: &GridKey, stop: &GridKey) -> Result<Self, ShapeError> {
        for (name, corner) in [("start", start), ("stop", stop)] {
            if !shape.contains(corner) {
                return Err(ShapeError::InvalidRegion {
                    reason: format!(
                        "{name} corner {corner} not inside shape {:?}",
                        shape.extents()
                    ),
                });
            }
        }
        if let Some(axis) = (0..shape.ndim()).find(|&a| start[a] > stop[a]) {
            return Err(ShapeError::InvalidRegion {
                reason: format!("start {start} > stop {stop} on axis {axis}"),
            });
        }
        Ok(Self::from_validated(shape, start.clone(), stop.clone()))
    }

    /// Build from corners already known to be a valid box of `shape`.
    pub(crate) fn from_validated(shape: &GridShape, start: GridKey, stop: GridKey) -> Self {
        let count = start
            .iter()
            .zip(stop.iter())
            .map(|(a, b)| (b - a + 1) as usize)
            .product();
        let mut it = Self {
            start,
            stop,
            strides: SmallVec::from_slice(shape.strides()),
            current: None,
            count,
            remaining: 0,
        };
        it.reset();
        it
    }

    /// Rewind to `start`.
    pub fn reset(&mut self) {
        self.current = (self.count > 0).then(|| self.start.clone());
        self.remaining = self.count;
    }

    /// The key the next call to `next` will return, without advancing.
    pub fn peek(&self) -> Option<&GridKey> {
        self.current.as_ref()
    }

    /// Whether at least one key remains.
    pub fn has_next(&self) -> bool {
        self.current.is_some()
    }

    /// Lower corner of the box (inclusive).
    pub fn start(&self) -> &GridKey {
        &self.start
    }

    /// Upper corner of the box (inclusive).
    pub fn stop(&self) -> &GridKey {
        &self.stop
    }

    /// Number of keys in the whole box.
    pub fn box_len(&self) -> usize {
        self.count
    }

    /// Linear id, in the parent shape, of the current key.
    pub fn lin_id(&self) -> Option<usize> {
        self.current.as_ref().map(|k| {
            k.iter()
                .zip(self.strides.iter())
                .map(|(c, &s)| c as usize * s)
                .sum()
        })
    }
}

impl Iterator for GridKeySubIter {
    type Item = GridKey;

    fn next(&mut self) -> Option<GridKey> {
        let key = self.current.take()?;
        let mut succ = key.clone();
        if step_within(&mut succ, &self.start, &self.stop) {
            self.current = Some(succ);
        }
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridKeySubIter {}

impl FusedIterator for GridKeySubIter {}
