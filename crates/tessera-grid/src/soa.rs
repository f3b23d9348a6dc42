//! Struct-of-arrays storage: each property's components are contiguous.

use tessera_core::PropertyId;

use crate::layout::PropertyLayout;
use crate::store::BackingStore;

/// Property-contiguous store.
///
/// Each property owns a column `Vec<f32>` of `slots * components` values,
/// so a sweep over one property touches a single dense array.
#[derive(Clone, Debug, Default)]
pub struct SoaStore {
    columns: Vec<Vec<f32>>,
    components: Vec<usize>,
    slots: usize,
}

impl BackingStore for SoaStore {
    fn allocate(layout: &PropertyLayout, slots: usize) -> Self {
        let components: Vec<usize> = layout
            .ids()
            .filter_map(|p| layout.range(p))
            .map(|r| r.len())
            .collect();
        Self {
            columns: components.iter().map(|&c| vec![0.0; slots * c]).collect(),
            components,
            slots,
        }
    }

    fn slots(&self) -> usize {
        self.slots
    }

    fn property(&self, slot: usize, prop: PropertyId) -> &[f32] {
        let p = prop.0 as usize;
        let c = self.components[p];
        &self.columns[p][slot * c..(slot + 1) * c]
    }

    fn property_mut(&mut self, slot: usize, prop: PropertyId) -> &mut [f32] {
        let p = prop.0 as usize;
        let c = self.components[p];
        &mut self.columns[p][slot * c..(slot + 1) * c]
    }

    fn read_slot(&self, slot: usize, out: &mut [f32]) {
        let mut cursor = 0;
        for (column, &c) in self.columns.iter().zip(&self.components) {
            out[cursor..cursor + c].copy_from_slice(&column[slot * c..(slot + 1) * c]);
            cursor += c;
        }
    }

    fn write_slot(&mut self, slot: usize, values: &[f32]) {
        let mut cursor = 0;
        for (column, &c) in self.columns.iter_mut().zip(&self.components) {
            column[slot * c..(slot + 1) * c].copy_from_slice(&values[cursor..cursor + c]);
            cursor += c;
        }
    }

    fn equals(&self, other: &Self) -> bool {
        self.slots == other.slots
            && self.components == other.components
            && self.columns == other.columns
    }

    fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    fn memory_bytes(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum::<usize>() * std::mem::size_of::<f32>()
    }
}
