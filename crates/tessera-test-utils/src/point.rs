//! The reference particle layout and id-derived fill patterns.
//!
//! Layout, in declaration order:
//!
//! | id | name | kind        | components |
//! |----|------|-------------|------------|
//! | 0  | `x`  | scalar      | 1          |
//! | 1  | `y`  | scalar      | 1          |
//! | 2  | `z`  | scalar      | 1          |
//! | 3  | `s`  | scalar      | 1          |
//! | 4  | `v`  | vector 3    | 3          |
//! | 5  | `t`  | matrix 3x3  | 9          |

use tessera_core::{GridError, GridKey, PropertyDef, PropertyId};
use tessera_grid::{BackingStore, Grid, PropertyLayout};

pub const X: PropertyId = PropertyId(0);
pub const Y: PropertyId = PropertyId(1);
pub const Z: PropertyId = PropertyId(2);
pub const S: PropertyId = PropertyId(3);
pub const V: PropertyId = PropertyId(4);
pub const T: PropertyId = PropertyId(5);

/// Components of one point element.
pub const POINT_WIDTH: usize = 16;

pub fn point_layout() -> PropertyLayout {
    PropertyLayout::new(&[
        PropertyDef::scalar("x"),
        PropertyDef::scalar("y"),
        PropertyDef::scalar("z"),
        PropertyDef::scalar("s"),
        PropertyDef::vector("v", 3),
        PropertyDef::matrix("t", 3, 3),
    ])
    .expect("point layout is valid")
}

/// The element values [`fill_grid`] writes for `key` at linear id `id`.
///
/// `x`, `y`, `z` are the first three key components (0 past the key's
/// dimensionality), `s = id`, `v = [id, id + 1, id + 2]`, and
/// `t[i][j] = id + 3i + j + 7`.
pub fn expected_point(key: &GridKey, id: usize) -> [f32; POINT_WIDTH] {
    let n = id as f32;
    let axis = |a: usize| if a < key.ndim() { key[a] as f32 } else { 0.0 };
    let mut out = [0.0; POINT_WIDTH];
    out[0] = axis(0);
    out[1] = axis(1);
    out[2] = axis(2);
    out[3] = n;
    out[4] = n;
    out[5] = n + 1.0;
    out[6] = n + 2.0;
    for i in 0..3 {
        for j in 0..3 {
            out[7 + 3 * i + j] = n + (3 * i + j) as f32 + 7.0;
        }
    }
    out
}

/// Fill every element of an active point grid with [`expected_point`].
pub fn fill_grid<St: BackingStore>(grid: &mut Grid<St>) -> Result<(), GridError> {
    let keys: Vec<GridKey> = grid.iter().collect();
    for key in &keys {
        fill_key(grid, key)?;
    }
    Ok(())
}

/// Fill one element with [`expected_point`].
pub fn fill_key<St: BackingStore>(grid: &mut Grid<St>, key: &GridKey) -> Result<(), GridError> {
    let id = grid.offset(key)?;
    let p = expected_point(key, id);
    let mut e = grid.element_mut(key)?;
    e.set_scalar(X, p[0])?;
    e.set_scalar(Y, p[1])?;
    e.set_scalar(Z, p[2])?;
    e.set_scalar(S, p[3])?;
    e.set(V, &p[4..7])?;
    e.set(T, &p[7..16])?;
    Ok(())
}

/// Whether the element at `key` holds [`expected_point`].
pub fn check_key<St: BackingStore>(grid: &Grid<St>, key: &GridKey) -> Result<bool, GridError> {
    let id = grid.offset(key)?;
    let e = grid.materialize(key)?;
    Ok(e.values() == expected_point(key, id).as_slice())
}

/// Whether every element of the grid holds [`expected_point`].
pub fn verify_grid<St: BackingStore>(grid: &Grid<St>) -> Result<bool, GridError> {
    for key in grid.iter() {
        if !check_key(grid, &key)? {
            return Ok(false);
        }
    }
    Ok(true)
}
