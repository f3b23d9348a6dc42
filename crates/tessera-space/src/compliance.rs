//! Shape compliance test helpers.
//!
//! These functions verify that a [`GridShape`] satisfies the invariants
//! the rest of the workspace relies on. Reused by the shape, iterator,
//! and decomposer test modules.

use crate::shape::GridShape;
use indexmap::IndexSet;
use tessera_core::{GridError, GridKey};

/// Assert that full iteration yields `size()` keys with `lin_id` 0, 1, 2, ...
pub fn assert_iteration_matches_linearization(shape: &GridShape) {
    let mut count = 0usize;
    for (n, key) in shape.iter().enumerate() {
        let id = shape.lin_id(&key);
        assert_eq!(id, n, "key {key} has lin_id {id}, expected {n}");
        count += 1;
    }
    assert_eq!(
        count,
        shape.size(),
        "iteration yielded {count} keys for shape of size {}",
        shape.size()
    );
}

/// Assert that iteration never yields the same key twice.
pub fn assert_iteration_unique(shape: &GridShape) {
    let unique: IndexSet<GridKey> = shape.iter().collect();
    assert_eq!(unique.len(), shape.size(), "iteration has duplicates");
}

/// Assert `inv_lin_id(lin_id(k)) == k` and `lin_id(inv_lin_id(x)) == x`.
pub fn assert_round_trip(shape: &GridShape) {
    for key in shape.iter() {
        let id = shape.lin_id(&key);
        assert_eq!(shape.inv_lin_id(id), key, "round trip failed for {key}");
    }
    for offset in 0..shape.size() {
        assert_eq!(shape.lin_id(&shape.inv_lin_id(offset)), offset);
    }
}

/// Assert that one step past the shape on any axis is rejected with the
/// right error kind.
pub fn assert_checked_rejects_outside(shape: &GridShape) {
    if shape.is_empty() {
        let origin = GridKey::zero(shape.ndim());
        assert!(shape.checked_lin_id(&origin).is_err());
        return;
    }
    for axis in 0..shape.ndim() {
        let mut past = shape.last_key();
        past[axis] += 1;
        assert!(
            matches!(
                shape.checked_lin_id(&past),
                Err(GridError::OutOfBounds { axis: a, .. }) if a == axis
            ),
            "{past} should be out of bounds on axis {axis}"
        );

        let mut before = GridKey::zero(shape.ndim());
        before[axis] = -1;
        assert_eq!(
            shape.checked_lin_id(&before),
            Err(GridError::NegativeIndex { axis, index: -1 })
        );
    }
}

/// Run all compliance checks on a shape.
pub fn run_full_compliance(shape: &GridShape) {
    assert_iteration_matches_linearization(shape);
    assert_iteration_unique(shape);
    assert_round_trip(shape);
    assert_checked_rejects_outside(shape);
}
