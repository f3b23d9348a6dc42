//! Element layout: the ordered property table shared by a grid and its store.
//!
//! A [`PropertyLayout`] assigns each declared property a sequential
//! [`PropertyId`] and a component range within one element. Declaration
//! order is the canonical order for element copies, equality, and packing.

use std::ops::Range;

use indexmap::IndexMap;
use tessera_core::{GridError, PropertyDef, PropertyId, PropertySet};

use crate::error::LayoutError;

/// The ordered set of properties every element of a grid carries.
#[derive(Clone, Debug)]
pub struct PropertyLayout {
    defs: Vec<PropertyDef>,
    /// Component range of each property within an element, by `PropertyId`.
    ranges: Vec<Range<usize>>,
    by_name: IndexMap<String, PropertyId>,
    width: usize,
}

impl PropertyLayout {
    /// Build a layout from property definitions in declaration order.
    ///
    /// Returns `Err(LayoutError::EmptyLayout)` for no definitions,
    /// `Err(LayoutError::EmptyProperty)` for a property with zero
    /// components, and `Err(LayoutError::DuplicateProperty)` for a repeated
    /// name.
    pub fn new(defs: &[PropertyDef]) -> Result<Self, LayoutError> {
        if defs.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        let mut by_name = IndexMap::with_capacity(defs.len());
        let mut ranges = Vec::with_capacity(defs.len());
        let mut cursor = 0usize;
        for (i, def) in defs.iter().enumerate() {
            let components = def.kind.components() as usize;
            if components == 0 {
                return Err(LayoutError::EmptyProperty {
                    name: def.name.clone(),
                });
            }
            if by_name.insert(def.name.clone(), PropertyId(i as u32)).is_some() {
                return Err(LayoutError::DuplicateProperty {
                    name: def.name.clone(),
                });
            }
            ranges.push(cursor..cursor + components);
            cursor += components;
        }
        Ok(Self {
            defs: defs.to_vec(),
            ranges,
            by_name,
            width: cursor,
        })
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Always `false`: empty layouts are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Total `f32` components of one element.
    pub fn element_width(&self) -> usize {
        self.width
    }

    /// Bytes one element occupies when every property is packed.
    pub fn element_bytes(&self) -> usize {
        self.width * std::mem::size_of::<f32>()
    }

    /// Look up a property by name.
    pub fn id_of(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Definition of `prop`, if it belongs to this layout.
    pub fn def(&self, prop: PropertyId) -> Option<&PropertyDef> {
        self.defs.get(prop.0 as usize)
    }

    /// Whether `prop` belongs to this layout.
    pub fn contains(&self, prop: PropertyId) -> bool {
        (prop.0 as usize) < self.defs.len()
    }

    /// Component range of `prop` within an element.
    pub fn range(&self, prop: PropertyId) -> Option<Range<usize>> {
        self.ranges.get(prop.0 as usize).cloned()
    }

    /// Component range of `prop`, or a `ShapeMismatch` naming the unknown
    /// property.
    pub fn checked_range(&self, prop: PropertyId) -> Result<Range<usize>, GridError> {
        self.range(prop).ok_or_else(|| {
            GridError::shape_mismatch(format!(
                "property {prop} not in layout of {} properties",
                self.len()
            ))
        })
    }

    /// Every property ID in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        (0..self.defs.len() as u32).map(PropertyId)
    }

    /// Iterate `(id, definition)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (PropertyId(i as u32), d))
    }

    /// The set of all properties.
    pub fn all(&self) -> PropertySet {
        self.ids().collect()
    }

    /// Resolve a selection: the empty set selects every property.
    ///
    /// Returns the selected IDs in declaration order, or `ShapeMismatch` if
    /// the set names a property outside this layout.
    pub fn select(&self, props: &PropertySet) -> Result<Vec<PropertyId>, GridError> {
        if props.is_empty() {
            return Ok(self.ids().collect());
        }
        props
            .iter()
            .map(|p| self.checked_range(p).map(|_| p))
            .collect()
    }

    /// `f32` components covered by `selected`.
    pub fn components_of(&self, selected: &[PropertyId]) -> usize {
        selected
            .iter()
            .filter_map(|&p| self.range(p))
            .map(|r| r.len())
            .sum()
    }
}

impl PartialEq for PropertyLayout {
    fn eq(&self, other: &Self) -> bool {
        self.defs == other.defs
    }
}

impl Eq for PropertyLayout {}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> PropertyLayout {
        PropertyLayout::new(&[
            PropertyDef::scalar("mass"),
            PropertyDef::vector("v", 3),
            PropertyDef::matrix("t", 3, 3),
        ])
        .unwrap()
    }

    #[test]
    fn ranges_follow_declaration_order() {
        let layout = particle();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.element_width(), 13);
        assert_eq!(layout.element_bytes(), 52);
        assert_eq!(layout.range(PropertyId(0)), Some(0..1));
        assert_eq!(layout.range(PropertyId(1)), Some(1..4));
        assert_eq!(layout.range(PropertyId(2)), Some(4..13));
        assert_eq!(layout.range(PropertyId(3)), None);
    }

    #[test]
    fn lookup_by_name() {
        let layout = particle();
        assert_eq!(layout.id_of("v"), Some(PropertyId(1)));
        assert_eq!(layout.id_of("missing"), None);
        assert_eq!(layout.def(PropertyId(2)).unwrap().name, "t");
    }

    #[test]
    fn rejects_duplicates_and_empties() {
        assert_eq!(
            PropertyLayout::new(&[PropertyDef::scalar("a"), PropertyDef::scalar("a")]),
            Err(LayoutError::DuplicateProperty {
                name: "a".to_string()
            })
        );
        assert_eq!(
            PropertyLayout::new(&[PropertyDef::vector("v", 0)]),
            Err(LayoutError::EmptyProperty {
                name: "v".to_string()
            })
        );
        assert_eq!(PropertyLayout::new(&[]), Err(LayoutError::EmptyLayout));
    }

    #[test]
    fn empty_selection_means_everything() {
        let layout = particle();
        let all = layout.select(&PropertySet::empty()).unwrap();
        assert_eq!(all, vec![PropertyId(0), PropertyId(1), PropertyId(2)]);
        assert_eq!(layout.components_of(&all), 13);
        assert_eq!(layout.all().len(), 3);
    }

    #[test]
    fn selection_is_declaration_ordered_and_validated() {
        let layout = particle();
        let set: PropertySet = [PropertyId(2), PropertyId(0)].into_iter().collect();
        assert_eq!(
            layout.select(&set).unwrap(),
            vec![PropertyId(0), PropertyId(2)]
        );
        let bad: PropertySet = [PropertyId(9)].into_iter().collect();
        assert!(matches!(
            layout.select(&bad),
            Err(GridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a = PropertyLayout::new(&[PropertyDef::scalar("x"), PropertyDef::scalar("y")]).unwrap();
        let b = PropertyLayout::new(&[PropertyDef::scalar("y"), PropertyDef::scalar("x")]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
