//! The [`GridKey`] coordinate tuple.

use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Inline storage for key components.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for index spaces
/// up to 4 dimensions. Higher-dimensional keys spill to the heap
/// transparently.
pub type KeyComponents = SmallVec<[i32; 4]>;

/// An ordered N-tuple of integer indices identifying one grid element.
///
/// Keys carry no bounds of their own: a component may be negative or
/// larger than any extent. Validity is a property of a key *relative to a
/// shape* and is checked by the shape, not by the key. The number of
/// components is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridKey(KeyComponents);

impl GridKey {
    /// The all-zero key of dimensionality `ndim`.
    pub fn zero(ndim: usize) -> Self {
        Self(SmallVec::from_elem(0, ndim))
    }

    /// A key with every component set to `value`.
    pub fn splat(ndim: usize, value: i32) -> Self {
        Self(SmallVec::from_elem(value, ndim))
    }

    /// Build a key from a component slice.
    pub fn from_slice(components: &[i32]) -> Self {
        Self(SmallVec::from_slice(components))
    }

    /// Number of components.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Component on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.ndim()`.
    pub fn get(&self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// Overwrite the component on `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= self.ndim()`.
    pub fn set(&mut self, axis: usize, value: i32) {
        self.0[axis] = value;
    }

    /// Borrow the components as a slice.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Borrow the components mutably.
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.0
    }

    /// Iterate over the components, axis 0 first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    /// Consume the key and return its components.
    pub fn into_inner(self) -> KeyComponents {
        self.0
    }
}

impl From<KeyComponents> for GridKey {
    fn from(v: KeyComponents) -> Self {
        Self(v)
    }
}

impl From<Vec<i32>> for GridKey {
    fn from(v: Vec<i32>) -> Self {
        Self(SmallVec::from_vec(v))
    }
}

impl<const N: usize> From<[i32; N]> for GridKey {
    fn from(v: [i32; N]) -> Self {
        Self(SmallVec::from_slice(&v))
    }
}

impl FromIterator<i32> for GridKey {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for GridKey {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl IndexMut<usize> for GridKey {
    fn index_mut(&mut self, axis: usize) -> &mut i32 {
        &mut self.0[axis]
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_splat() {
        assert_eq!(GridKey::zero(3).as_slice(), &[0, 0, 0]);
        assert_eq!(GridKey::splat(2, 7).as_slice(), &[7, 7]);
        assert_eq!(GridKey::zero(0).ndim(), 0);
    }

    #[test]
    fn set_and_get_are_per_axis() {
        let mut k = GridKey::zero(4);
        k.set(2, -5);
        k[3] = 9;
        assert_eq!(k.get(0), 0);
        assert_eq!(k.get(2), -5);
        assert_eq!(k[3], 9);
    }

    #[test]
    fn higher_dimensional_keys_spill_transparently() {
        let k: GridKey = (0..8).collect();
        assert_eq!(k.ndim(), 8);
        assert_eq!(k.get(7), 7);
    }

    #[test]
    fn display_lists_components() {
        assert_eq!(GridKey::from([3, -1]).to_string(), "(3, -1)");
    }
}
