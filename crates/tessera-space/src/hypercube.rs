//! Hypercube face enumeration.
//!
//! A [`Comb`] assigns each axis of a box one of three selectors: `-1` for
//! the low boundary layer, `+1` for the high boundary layer, and `0` for
//! the interior range between them. A comb with exactly `k` non-zero
//! entries names one codimension-`k` feature of the box: `k = 0` is the
//! interior, `k = 1` the faces, ..., `k = dim` the corners.

use smallvec::SmallVec;
use std::fmt;

/// Per-axis boundary selector with values in `{-1, 0, +1}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Comb(SmallVec<[i8; 4]>);

impl Comb {
    /// Build a comb from per-axis selectors.
    ///
    /// # Panics
    ///
    /// Panics if any selector is outside `{-1, 0, 1}`.
    pub fn new(selectors: &[i8]) -> Self {
        assert!(
            selectors.iter().all(|s| (-1..=1).contains(s)),
            "comb selectors must be -1, 0 or 1, got {selectors:?}"
        );
        Self(SmallVec::from_slice(selectors))
    }

    /// The interior comb (all zeros) of dimensionality `dim`.
    pub fn zero(dim: usize) -> Self {
        Self(SmallVec::from_elem(0, dim))
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Selector on `axis`.
    pub fn get(&self, axis: usize) -> i8 {
        self.0[axis]
    }

    /// All selectors, axis 0 first.
    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    /// Number of interior (zero) selectors.
    pub fn n_zero(&self) -> usize {
        self.0.iter().filter(|&&s| s == 0).count()
    }

    /// Number of pinned (non-zero) selectors: the codimension.
    pub fn n_non_zero(&self) -> usize {
        self.dim() - self.n_zero()
    }

    /// Whether this is the interior comb.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&s| s == 0)
    }

    /// The comb of the opposite feature (every selector negated).
    pub fn negated(&self) -> Self {
        Self(self.0.iter().map(|&s| -s).collect())
    }

    /// Base-3 index of this comb among all `3^dim` combs of its
    /// dimensionality (`-1 -> 0`, `0 -> 1`, `+1 -> 2`, axis 0 least
    /// significant).
    pub fn lin_id(&self) -> usize {
        self.0
            .iter()
            .rev()
            .fold(0usize, |acc, &s| acc * 3 + (s + 1) as usize)
    }
}

impl fmt::Display for Comb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, "]")
    }
}

/// Enumerator of the boundary features of a `dim`-dimensional hypercube.
pub struct HyperCube;

impl HyperCube {
    /// Binomial coefficient `C(n, k)`; zero when `k > n`.
    pub fn binomial(n: usize, k: usize) -> usize {
        if k > n {
            return 0;
        }
        let k = k.min(n - k);
        (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
    }

    /// Number of codimension-`k` features: `C(dim, k) * 2^k`.
    pub fn number_of_elements_r(dim: usize, k: usize) -> usize {
        Self::binomial(dim, k) << k
    }

    /// Every comb of `dim` axes with exactly `k` non-zero selectors.
    ///
    /// The result is duplicate-free and has
    /// [`number_of_elements_r(dim, k)`](Self::number_of_elements_r)
    /// entries. Pinned-axis subsets come in lexicographic order; within a
    /// subset the lowest pinned axis flips fastest, `-1` before `+1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_space::HyperCube;
    ///
    /// let edges = HyperCube::combinations_r(2, 1);
    /// let sel: Vec<&[i8]> = edges.iter().map(|c| c.as_slice()).collect();
    /// assert_eq!(sel, vec![&[-1, 0][..], &[1, 0], &[0, -1], &[0, 1]]);
    /// ```
    pub fn combinations_r(dim: usize, k: usize) -> Vec<Comb> {
        if k > dim {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(Self::number_of_elements_r(dim, k));
        let mut axes: Vec<usize> = (0..k).collect();
        loop {
            for signs in 0..(1usize << k) {
                let mut comb = Comb::zero(dim);
                for (j, &axis) in axes.iter().enumerate() {
                    comb.0[axis] = if (signs >> j) & 1 == 0 { -1 } else { 1 };
                }
                out.push(comb);
            }
            if !next_subset(&mut axes, dim) {
                break;
            }
        }
        out
    }
}

/// Advance `axes` to the next k-subset of `0..n` in lexicographic order.
fn next_subset(axes: &mut [usize], n: usize) -> bool {
    let k = axes.len();
    let Some(i) = (0..k).rev().find(|&i| axes[i] < n - k + i) else {
        return false;
    };
    axes[i] += 1;
    for j in i + 1..k {
        axes[j] = axes[j - 1] + 1;
    }
    true
}
