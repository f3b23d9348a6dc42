//! Array-of-structs storage: each element's components are contiguous.

use std::ops::Range;

use tessera_core::PropertyId;

use crate::layout::PropertyLayout;
use crate::store::BackingStore;

/// Element-contiguous store.
///
/// All elements live in one `Vec<f32>`; element `n` occupies
/// `data[n * width .. (n + 1) * width]` with its properties in declaration
/// order. Whole-element reads and writes are a single slice copy.
#[derive(Clone, Debug, Default)]
pub struct AosStore {
    data: Vec<f32>,
    ranges: Vec<Range<usize>>,
    width: usize,
}

impl AosStore {
    fn element(&self, slot: usize) -> &[f32] {
        &self.data[slot * self.width..(slot + 1) * self.width]
    }
}

impl BackingStore for AosStore {
    fn allocate(layout: &PropertyLayout, slots: usize) -> Self {
        let width = layout.element_width();
        Self {
            data: vec![0.0; slots * width],
            ranges: layout.ids().filter_map(|p| layout.range(p)).collect(),
            width,
        }
    }

    fn slots(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    fn property(&self, slot: usize, prop: PropertyId) -> &[f32] {
        let r = &self.ranges[prop.0 as usize];
        let base = slot * self.width;
        &self.data[base + r.start..base + r.end]
    }

    fn property_mut(&mut self, slot: usize, prop: PropertyId) -> &mut [f32] {
        let r = &self.ranges[prop.0 as usize];
        let base = slot * self.width;
        &mut self.data[base + r.start..base + r.end]
    }

    fn read_slot(&self, slot: usize, out: &mut [f32]) {
        out.copy_from_slice(self.element(slot));
    }

    fn write_slot(&mut self, slot: usize, values: &[f32]) {
        self.data[slot * self.width..(slot + 1) * self.width].copy_from_slice(values);
    }

    fn equals(&self, other: &Self) -> bool {
        self.width == other.width && self.data == other.data
    }

    fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }
}
