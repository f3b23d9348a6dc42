//! Element views and detached element copies.
//!
//! [`ElementRef`] and [`ElementMut`] borrow one slot of a grid's store:
//! writes through an `ElementMut` are visible through direct property
//! access and vice versa. An [`Element`] is a standalone copy of every
//! property of one element; it shares nothing with the store it came from.

use std::sync::Arc;

use tessera_core::{GridError, PropertyId};

use crate::layout::PropertyLayout;
use crate::store::BackingStore;

fn expect_scalar(layout: &PropertyLayout, prop: PropertyId) -> Result<(), GridError> {
    let r = layout.checked_range(prop)?;
    if r.len() != 1 {
        return Err(GridError::shape_mismatch(format!(
            "property {prop} has {} components, not a scalar",
            r.len()
        )));
    }
    Ok(())
}

/// Shared view of one grid element.
pub struct ElementRef<'a, S: BackingStore> {
    store: &'a S,
    layout: &'a Arc<PropertyLayout>,
    slot: usize,
}

impl<'a, S: BackingStore> ElementRef<'a, S> {
    pub(crate) fn new(store: &'a S, layout: &'a Arc<PropertyLayout>, slot: usize) -> Self {
        Self {
            store,
            layout,
            slot,
        }
    }

    /// Linear offset of the element in its grid.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Components of `prop`.
    pub fn get(&self, prop: PropertyId) -> Result<&'a [f32], GridError> {
        self.layout.checked_range(prop)?;
        Ok(self.store.property(self.slot, prop))
    }

    /// Value of a scalar property.
    pub fn scalar(&self, prop: PropertyId) -> Result<f32, GridError> {
        expect_scalar(self.layout, prop)?;
        Ok(self.store.property(self.slot, prop)[0])
    }

    /// Copy the element out of the store.
    pub fn to_element(&self) -> Element {
        detach(self.store, self.layout, self.slot)
    }
}

/// Exclusive view of one grid element.
pub struct ElementMut<'a, S: BackingStore> {
    store: &'a mut S,
    layout: &'a Arc<PropertyLayout>,
    slot: usize,
}

impl<'a, S: BackingStore> ElementMut<'a, S> {
    pub(crate) fn new(store: &'a mut S, layout: &'a Arc<PropertyLayout>, slot: usize) -> Self {
        Self {
            store,
            layout,
            slot,
        }
    }

    /// Linear offset of the element in its grid.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Components of `prop`.
    pub fn get(&self, prop: PropertyId) -> Result<&[f32], GridError> {
        self.layout.checked_range(prop)?;
        Ok(self.store.property(self.slot, prop))
    }

    /// Mutable components of `prop`.
    pub fn get_mut(&mut self, prop: PropertyId) -> Result<&mut [f32], GridError> {
        self.layout.checked_range(prop)?;
        Ok(self.store.property_mut(self.slot, prop))
    }

    /// Overwrite every component of `prop`.
    ///
    /// `values` must have exactly the property's component count.
    pub fn set(&mut self, prop: PropertyId, values: &[f32]) -> Result<(), GridError> {
        let dst = self.get_mut(prop)?;
        if dst.len() != values.len() {
            return Err(GridError::shape_mismatch(format!(
                "property {prop} has {} components, got {}",
                dst.len(),
                values.len()
            )));
        }
        dst.copy_from_slice(values);
        Ok(())
    }

    /// Value of a scalar property.
    pub fn scalar(&self, prop: PropertyId) -> Result<f32, GridError> {
        expect_scalar(self.layout, prop)?;
        Ok(self.store.property(self.slot, prop)[0])
    }

    /// Set a scalar property.
    pub fn set_scalar(&mut self, prop: PropertyId, value: f32) -> Result<(), GridError> {
        expect_scalar(self.layout, prop)?;
        self.store.property_mut(self.slot, prop)[0] = value;
        Ok(())
    }

    /// Copy the element out of the store.
    pub fn to_element(&self) -> Element {
        detach(&*self.store, self.layout, self.slot)
    }
}

fn detach<S: BackingStore>(store: &S, layout: &Arc<PropertyLayout>, slot: usize) -> Element {
    let mut values = vec![0.0; layout.element_width()];
    store.read_slot(slot, &mut values);
    Element {
        layout: Arc::clone(layout),
        values,
    }
}

/// A detached copy of one element: every property, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    layout: Arc<PropertyLayout>,
    values: Vec<f32>,
}

impl Element {
    /// A zeroed element of `layout`.
    pub fn zeroed(layout: impl Into<Arc<PropertyLayout>>) -> Self {
        let layout = layout.into();
        let values = vec![0.0; layout.element_width()];
        Self { layout, values }
    }

    /// The layout this element follows.
    pub fn layout(&self) -> &PropertyLayout {
        &self.layout
    }

    /// All components, properties in declaration order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Components of `prop`.
    pub fn get(&self, prop: PropertyId) -> Result<&[f32], GridError> {
        let r = self.layout.checked_range(prop)?;
        Ok(&self.values[r])
    }

    /// Mutable components of `prop`.
    pub fn get_mut(&mut self, prop: PropertyId) -> Result<&mut [f32], GridError> {
        let r = self.layout.checked_range(prop)?;
        Ok(&mut self.values[r])
    }

    /// Value of a scalar property.
    pub fn scalar(&self, prop: PropertyId) -> Result<f32, GridError> {
        expect_scalar(&self.layout, prop)?;
        Ok(self.get(prop)?[0])
    }

    /// Set a scalar property.
    pub fn set_scalar(&mut self, prop: PropertyId, value: f32) -> Result<(), GridError> {
        expect_scalar(&self.layout, prop)?;
        self.get_mut(prop)?[0] = value;
        Ok(())
    }
}
