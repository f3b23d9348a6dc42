use tessera::prelude::*;
use tessera_test_utils::{fill_grid, point_layout, uniform_positions, verify_grid};

#[test]
fn particles_land_in_interior_cells_of_a_padded_grid() {
    let domain = SpaceBox::new(&[0.0, 0.0, 0.0], &[2.0, 1.0, 1.0]).unwrap();
    let cells = CellDecomposer::new(&domain, &[10, 6, 6]).unwrap();
    let mut counts: Grid<AosStore> = Grid::new(
        cells.grid().clone(),
        PropertyLayout::new(&[PropertyDef::scalar("n")]).unwrap(),
    );
    counts.activate();
    let n = PropertyId(0);

    let positions = uniform_positions(&domain, 500, 42);
    for pos in &positions {
        let key = cells.cell_key(pos).unwrap();
        assert!(cells.is_interior(&key));
        counts.get_mut(n, &key).unwrap()[0] += 1.0;
    }

    let total: f32 = counts.iter().map(|k| counts.scalar(n, &k).unwrap()).sum();
    assert_eq!(total, 500.0);
    for shell in cells.grid().shell_boxes(1) {
        assert!(shell.keys().all(|k| counts.scalar(n, &k) == Ok(0.0)));
    }
}

#[test]
fn point_fixture_through_the_facade() {
    let mut g: Grid<SoaStore> = Grid::with_extents(&[3, 3, 3], point_layout()).unwrap();
    g.activate();
    fill_grid(&mut g).unwrap();
    assert!(verify_grid(&g).unwrap());
    let copy = g.clone();
    assert_eq!(g, copy);
}
