//! Element property definitions and the [`PropertySet`] selection mask.

use std::fmt;

use smallvec::SmallVec;

/// Identifies a property within an element layout.
///
/// Properties are assigned sequential IDs in declaration order:
/// `PropertyId(n)` is the n-th declared property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PropertyId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Shape of a single property value.
///
/// All components are stored as `f32`. Matrices are row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// One value per element.
    Scalar,
    /// A fixed-size vector per element.
    Vector {
        /// Number of components (e.g. 3 for a velocity).
        dims: u32,
    },
    /// A fixed-size matrix per element.
    Matrix {
        /// Number of rows.
        rows: u32,
        /// Number of columns.
        cols: u32,
    },
}

impl PropertyKind {
    /// Number of `f32` storage slots this property needs per element.
    pub fn components(&self) -> u32 {
        match self {
            Self::Scalar => 1,
            Self::Vector { dims } => *dims,
            Self::Matrix { rows, cols } => rows * cols,
        }
    }
}

/// Definition of one named property of a grid element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDef {
    /// Name used for lookup and diagnostics.
    pub name: String,
    /// Value shape.
    pub kind: PropertyKind,
}

impl PropertyDef {
    /// A scalar property.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Scalar,
        }
    }

    /// A vector property with `dims` components.
    pub fn vector(name: impl Into<String>, dims: u32) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Vector { dims },
        }
    }

    /// A row-major `rows x cols` matrix property.
    pub fn matrix(name: impl Into<String>, rows: u32, cols: u32) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Matrix { rows, cols },
        }
    }
}

/// A selection of properties, stored as a bitmask over [`PropertyId`]s.
///
/// Used to select which properties take part in packing and unpacking.
/// Iteration is always in ascending ID order, which is declaration order,
/// however the IDs were inserted. The empty set is meaningful to callers:
/// `PropertyLayout::select` in `tessera-grid` reads it as "every property".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertySet {
    // One bit per id; word `w` covers ids `64w..64w + 64`. Words are only
    // ever added, so equal sets always have equal word counts.
    words: SmallVec<[u64; 1]>,
}

impl PropertySet {
    /// The empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    fn locate(prop: PropertyId) -> (usize, u64) {
        let id = prop.0 as usize;
        (id / 64, 1u64 << (id % 64))
    }

    /// Add `prop` to the selection. Inserting twice is a no-op.
    pub fn insert(&mut self, prop: PropertyId) {
        let (word, mask) = Self::locate(prop);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= mask;
    }

    /// Whether `prop` is selected.
    pub fn contains(&self, prop: PropertyId) -> bool {
        let (word, mask) = Self::locate(prop);
        self.words.get(word).is_some_and(|w| w & mask != 0)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of selected properties.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Selected IDs in ascending order.
    pub fn iter(&self) -> PropertySetIter<'_> {
        PropertySetIter {
            words: &self.words,
            index: 0,
            pending: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl FromIterator<PropertyId> for PropertySet {
    fn from_iter<I: IntoIterator<Item = PropertyId>>(iter: I) -> Self {
        let mut set = Self::empty();
        iter.into_iter().for_each(|p| set.insert(p));
        set
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = PropertyId;
    type IntoIter = PropertySetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`PropertySet`].
pub struct PropertySetIter<'a> {
    words: &'a [u64],
    index: usize,
    /// Bits of `words[index]` not yet yielded.
    pending: u64,
}

impl Iterator for PropertySetIter<'_> {
    type Item = PropertyId;

    fn next(&mut self) -> Option<PropertyId> {
        while self.pending == 0 {
            self.index += 1;
            self.pending = *self.words.get(self.index)?;
        }
        let bit = self.pending.trailing_zeros() as usize;
        self.pending &= self.pending - 1;
        Some(PropertyId((self.index * 64 + bit) as u32))
    }
}
