//! Seeded position generation.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tessera_space::Domain;

/// `n` positions drawn uniformly from the half-open `domain`.
///
/// The same seed always yields the same positions.
pub fn uniform_positions<D: Domain>(domain: &D, n: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (0..domain.dim())
                .map(|a| rng.random_range(domain.low(a)..domain.high(a)))
                .collect()
        })
        .collect()
}
