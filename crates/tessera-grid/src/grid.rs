//! The [`Grid`] container: a shape, a layout, and a pluggable store.

use std::sync::Arc;

use log::debug;
use tessera_core::{GridError, GridKey, PropertyId};
use tessera_space::{GridShape, ShapeError};

use crate::element::{Element, ElementMut, ElementRef};
use crate::iter::{GridIter, StoreStamp};
use crate::layout::PropertyLayout;
use crate::store::BackingStore;

/// Lifecycle of a grid's storage.
#[derive(Clone, Debug)]
enum StoreState<S> {
    /// Never activated.
    Unallocated,
    /// Holding `shape.size()` zero-initialized or written elements.
    Active(S),
    /// Dropped by [`Grid::release`]; remembers the generation it had.
    Released { last_live: u64 },
}

/// An N-dimensional grid of elements with a fixed property layout.
///
/// The grid owns its [`GridShape`] (the only source of element count and
/// stride) and a store of type `S` chosen at construction: [`AosStore`]
/// keeps each element contiguous, [`SoaStore`] keeps each property
/// contiguous. Both behave identically through this API.
///
/// A grid is created unallocated; [`Grid::activate`] allocates zeroed
/// storage. Every operation that replaces the store gives the grid a new
/// [`StoreStamp`], so iterators issued earlier, or by another grid, are
/// rejected by [`Grid::check_stamp`].
///
/// With the `checked` feature (on by default) every key is validated
/// against the shape; without it key checks compile away and an invalid
/// key is a caller bug.
///
/// [`AosStore`]: crate::AosStore
/// [`SoaStore`]: crate::SoaStore
///
/// # Examples
///
/// ```
/// use tessera_core::{GridKey, PropertyDef, PropertyId};
/// use tessera_grid::{AosStore, Grid, PropertyLayout};
///
/// let layout = PropertyLayout::new(&[PropertyDef::scalar("rho")]).unwrap();
/// let mut grid: Grid<AosStore> = Grid::with_extents(&[4, 4], layout).unwrap();
/// grid.activate();
///
/// let key = GridKey::from([1, 2]);
/// grid.set_scalar(PropertyId(0), &key, 3.5).unwrap();
/// assert_eq!(grid.scalar(PropertyId(0), &key).unwrap(), 3.5);
/// ```
#[derive(Clone, Debug)]
pub struct Grid<S: BackingStore> {
    shape: GridShape,
    layout: Arc<PropertyLayout>,
    state: StoreState<S>,
    generation: u64,
}

impl<S: BackingStore> Grid<S> {
    /// An unallocated grid over `shape`.
    pub fn new(shape: GridShape, layout: impl Into<Arc<PropertyLayout>>) -> Self {
        Self {
            shape,
            layout: layout.into(),
            state: StoreState::Unallocated,
            generation: StoreStamp::next().0,
        }
    }

    /// An unallocated grid over a shape built from `extents`.
    pub fn with_extents(
        extents: &[usize],
        layout: impl Into<Arc<PropertyLayout>>,
    ) -> Result<Self, ShapeError> {
        Ok(Self::new(GridShape::new(extents)?, layout))
    }

    /// Allocate zeroed storage for the current shape.
    ///
    /// Activating an active grid discards its data.
    pub fn activate(&mut self) {
        self.state = StoreState::Active(S::allocate(&self.layout, self.shape.size()));
        self.generation = StoreStamp::next().0;
        debug!(
            "grid activated: extents {:?}, {} elements, generation {}",
            self.shape.extents(),
            self.shape.size(),
            self.generation
        );
    }

    /// Drop the storage. Later data access reports `UseAfterRelease`.
    pub fn release(&mut self) {
        let last_live = self.generation;
        self.state = StoreState::Released { last_live };
        self.generation = StoreStamp::next().0;
        debug!("grid released at generation {last_live}");
    }

    /// Whether storage is allocated.
    pub fn is_active(&self) -> bool {
        matches!(self.state, StoreState::Active(_))
    }

    /// The shape.
    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// The property layout.
    pub fn layout(&self) -> &Arc<PropertyLayout> {
        &self.layout
    }

    /// Number of elements (product of the extents).
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Current storage generation.
    pub fn stamp(&self) -> StoreStamp {
        StoreStamp(self.generation)
    }

    /// The backing store.
    pub fn store(&self) -> Result<&S, GridError> {
        match &self.state {
            StoreState::Active(s) => Ok(s),
            StoreState::Unallocated => Err(GridError::UninitializedStore),
            StoreState::Released { last_live } => Err(GridError::UseAfterRelease {
                held: *last_live,
                current: self.generation,
            }),
        }
    }

    /// The backing store, mutably.
    pub fn store_mut(&mut self) -> Result<&mut S, GridError> {
        match &mut self.state {
            StoreState::Active(s) => Ok(s),
            StoreState::Unallocated => Err(GridError::UninitializedStore),
            StoreState::Released { last_live } => Err(GridError::UseAfterRelease {
                held: *last_live,
                current: self.generation,
            }),
        }
    }

    /// Linear offset of `key`, validated when the `checked` feature is on.
    pub fn offset(&self, key: &GridKey) -> Result<usize, GridError> {
        #[cfg(feature = "checked")]
        {
            self.shape.checked_lin_id(key)
        }
        #[cfg(not(feature = "checked"))]
        {
            Ok(self.shape.lin_id(key))
        }
    }

    /// Components of `prop` at `key`.
    pub fn get(&self, prop: PropertyId, key: &GridKey) -> Result<&[f32], GridError> {
        self.layout.checked_range(prop)?;
        let slot = self.offset(key)?;
        Ok(self.store()?.property(slot, prop))
    }

    /// Mutable components of `prop` at `key`.
    pub fn get_mut(&mut self, prop: PropertyId, key: &GridKey) -> Result<&mut [f32], GridError> {
        self.layout.checked_range(prop)?;
        let slot = self.offset(key)?;
        Ok(self.store_mut()?.property_mut(slot, prop))
    }

    /// Value of scalar property `prop` at `key`.
    pub fn scalar(&self, prop: PropertyId, key: &GridKey) -> Result<f32, GridError> {
        self.element(key)?.scalar(prop)
    }

    /// Set scalar property `prop` at `key`.
    pub fn set_scalar(
        &mut self,
        prop: PropertyId,
        key: &GridKey,
        value: f32,
    ) -> Result<(), GridError> {
        self.element_mut(key)?.set_scalar(prop, value)
    }

    /// Shared view of the element at `key`.
    pub fn element(&self, key: &GridKey) -> Result<ElementRef<'_, S>, GridError> {
        let slot = self.offset(key)?;
        Ok(ElementRef::new(self.store()?, &self.layout, slot))
    }

    /// Exclusive view of the element at `key`.
    pub fn element_mut(&mut self, key: &GridKey) -> Result<ElementMut<'_, S>, GridError> {
        let slot = self.offset(key)?;
        let layout = &self.layout;
        let store = match &mut self.state {
            StoreState::Active(s) => s,
            StoreState::Unallocated => return Err(GridError::UninitializedStore),
            StoreState::Released { last_live } => {
                return Err(GridError::UseAfterRelease {
                    held: *last_live,
                    current: self.generation,
                })
            }
        };
        Ok(ElementMut::new(store, layout, slot))
    }

    /// A detached copy of the element at `key`.
    pub fn materialize(&self, key: &GridKey) -> Result<Element, GridError> {
        Ok(self.element(key)?.to_element())
    }

    /// Overwrite the element at `key` with `element`.
    ///
    /// Returns `ShapeMismatch` if `element` follows a different layout.
    pub fn set_element(&mut self, key: &GridKey, element: &Element) -> Result<(), GridError> {
        if element.layout() != &*self.layout {
            return Err(GridError::shape_mismatch(
                "element layout differs from grid layout",
            ));
        }
        let slot = self.offset(key)?;
        self.store_mut()?.write_slot(slot, element.values());
        Ok(())
    }

    /// Copy the element at `src_key` of `src` into `dst_key` of this grid.
    ///
    /// The source may use a different store type. Returns `ShapeMismatch`
    /// if the layouts differ or `src_key` is not a valid key of `src`; the
    /// reason names the underlying negative or out-of-bounds component.
    pub fn copy_element_from<T: BackingStore>(
        &mut self,
        dst_key: &GridKey,
        src: &Grid<T>,
        src_key: &GridKey,
    ) -> Result<(), GridError> {
        if src.layout() != &self.layout {
            return Err(GridError::shape_mismatch(
                "source grid layout differs from destination layout",
            ));
        }
        let src_slot = src
            .offset(src_key)
            .map_err(|e| GridError::shape_mismatch(format!("source key {src_key}: {e}")))?;
        let dst_slot = self.offset(dst_key)?;
        let mut values = vec![0.0; self.layout.element_width()];
        src.store()?.read_slot(src_slot, &mut values);
        self.store_mut()?.write_slot(dst_slot, &values);
        Ok(())
    }

    /// Iterate every key, stamped with the current generation.
    pub fn iter(&self) -> GridIter {
        GridIter::full(self.shape.iter(), self.stamp())
    }

    /// Iterate the inclusive box `[start, stop]`, stamped with the current
    /// generation.
    pub fn sub_iter(&self, start: &GridKey, stop: &GridKey) -> Result<GridIter, ShapeError> {
        Ok(GridIter::sub(self.shape.sub_iter(start, stop)?, self.stamp()))
    }

    /// Check that an iterator stamp still matches this grid's storage.
    ///
    /// Returns `UseAfterRelease` if the store was replaced (activate,
    /// resize, swap, release) after the stamp was taken, or if the stamp
    /// was issued by a different grid.
    pub fn check_stamp(&self, stamp: StoreStamp) -> Result<(), GridError> {
        if stamp.0 != self.generation {
            return Err(GridError::UseAfterRelease {
                held: stamp.0,
                current: self.generation,
            });
        }
        Ok(())
    }

    /// Change the extents. Destructive: an active grid gets new zeroed
    /// storage; an inactive grid stays inactive.
    ///
    /// On error the grid is unchanged.
    pub fn resize(&mut self, extents: &[usize]) -> Result<(), ShapeError> {
        self.shape.set_dimensions(extents)?;
        if self.is_active() {
            self.state = StoreState::Active(S::allocate(&self.layout, self.shape.size()));
        }
        self.generation = StoreStamp::next().0;
        debug!(
            "grid resized to {:?} ({} elements), generation {}",
            extents,
            self.shape.size(),
            self.generation
        );
        Ok(())
    }

    /// Exchange shape and storage with `other` in O(1).
    ///
    /// Returns `ShapeMismatch` if the layouts differ. Both grids draw fresh
    /// stamps, invalidating all earlier iterators of either.
    pub fn swap(&mut self, other: &mut Self) -> Result<(), GridError> {
        if self.layout != other.layout {
            return Err(GridError::shape_mismatch(
                "cannot swap grids with different layouts",
            ));
        }
        std::mem::swap(&mut self.shape, &mut other.shape);
        match (&mut self.state, &mut other.state) {
            (StoreState::Active(a), StoreState::Active(b)) => a.swap_with(b),
            (a, b) => std::mem::swap(a, b),
        }
        self.generation = StoreStamp::next().0;
        other.generation = StoreStamp::next().0;
        debug!(
            "grids swapped, generations {} and {}",
            self.generation, other.generation
        );
        Ok(())
    }
}

impl<S: BackingStore> PartialEq for Grid<S> {
    /// Same layout, same shape, and equal data for every property of every
    /// element. Two grids holding no data are equal when shape and layout
    /// match.
    fn eq(&self, other: &Self) -> bool {
        if self.layout != other.layout || self.shape != other.shape {
            return false;
        }
        match (&self.state, &other.state) {
            (StoreState::Active(a), StoreState::Active(b)) => a.equals(b),
            (StoreState::Active(_), _) | (_, StoreState::Active(_)) => false,
            _ => true,
        }
    }
}
