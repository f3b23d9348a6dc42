//! The storage strategy seam between a grid and its memory layout.
//!
//! A [`BackingStore`] holds `slots` elements of one [`PropertyLayout`] and
//! addresses them by linear offset. The grid owns linearization, bounds
//! checks, and lifecycle; the store only decides where the `f32`
//! components of each property live.

use tessera_core::PropertyId;

use crate::layout::PropertyLayout;

/// Element storage addressed by linear offset.
///
/// Implementations must agree on observable behavior: the same sequence
/// of writes produces the same reads regardless of physical layout. The
/// caller guarantees `slot < self.slots()` and that `prop` belongs to the
/// layout the store was allocated for; implementations may panic
/// otherwise.
pub trait BackingStore {
    /// Allocate zeroed storage for `slots` elements of `layout`.
    fn allocate(layout: &PropertyLayout, slots: usize) -> Self
    where
        Self: Sized;

    /// Number of element slots.
    fn slots(&self) -> usize;

    /// Components of `prop` for the element at `slot`.
    fn property(&self, slot: usize, prop: PropertyId) -> &[f32];

    /// Mutable components of `prop` for the element at `slot`.
    fn property_mut(&mut self, slot: usize, prop: PropertyId) -> &mut [f32];

    /// Copy the whole element at `slot` into `out`, properties in
    /// declaration order. `out` has the layout's element width.
    fn read_slot(&self, slot: usize, out: &mut [f32]);

    /// Overwrite the whole element at `slot` from `values`, properties in
    /// declaration order.
    fn write_slot(&mut self, slot: usize, values: &[f32]);

    /// Whether both stores hold the same number of slots with equal
    /// components.
    fn equals(&self, other: &Self) -> bool
    where
        Self: Sized;

    /// Exchange contents with `other` in O(1).
    fn swap_with(&mut self, other: &mut Self)
    where
        Self: Sized;

    /// Heap bytes held by the element data.
    fn memory_bytes(&self) -> usize;
}
