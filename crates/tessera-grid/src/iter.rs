//! Grid iterators stamped with the storage generation they were issued for.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

use tessera_core::GridKey;
use tessera_space::{GridKeyIter, GridKeySubIter};

static STAMP_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Storage generation of a grid at the time a [`GridIter`] was issued.
///
/// Stamps come from a process-wide counter, so no two grids share one and
/// a stamp is never reused. A grid draws a fresh stamp whenever its store
/// is replaced (activate, resize, swap, release); a clone keeps the stamp
/// of its source. [`Grid::check_stamp`](crate::Grid::check_stamp) compares
/// a stamp against the grid's current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreStamp(pub u64);

impl StoreStamp {
    /// Allocate a stamp no grid has held yet.
    pub(crate) fn next() -> Self {
        Self(STAMP_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for StoreStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

#[derive(Clone, Debug)]
enum Keys {
    Full(GridKeyIter),
    Sub(GridKeySubIter),
}

/// Key iterator over a grid or a sub-box of it.
///
/// Yields keys in linearization order and records the [`StoreStamp`] of
/// the grid it came from.
#[derive(Clone, Debug)]
pub struct GridIter {
    keys: Keys,
    stamp: StoreStamp,
}

impl GridIter {
    pub(crate) fn full(keys: GridKeyIter, stamp: StoreStamp) -> Self {
        Self {
            keys: Keys::Full(keys),
            stamp,
        }
    }

    pub(crate) fn sub(keys: GridKeySubIter, stamp: StoreStamp) -> Self {
        Self {
            keys: Keys::Sub(keys),
            stamp,
        }
    }

    /// Generation of the grid this iterator was issued for.
    pub fn stamp(&self) -> StoreStamp {
        self.stamp
    }

    /// The next key, without advancing.
    pub fn peek(&self) -> Option<&GridKey> {
        match &self.keys {
            Keys::Full(it) => it.peek(),
            Keys::Sub(it) => it.peek(),
        }
    }

    /// Rewind to the first key.
    pub fn reset(&mut self) {
        match &mut self.keys {
            Keys::Full(it) => it.reset(),
            Keys::Sub(it) => it.reset(),
        }
    }
}

impl Iterator for GridIter {
    type Item = GridKey;

    fn next(&mut self) -> Option<GridKey> {
        match &mut self.keys {
            Keys::Full(it) => it.next(),
            Keys::Sub(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.keys {
            Keys::Full(it) => it.size_hint(),
            Keys::Sub(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for GridIter {}

impl FusedIterator for GridIter {}
