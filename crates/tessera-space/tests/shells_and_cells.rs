use tessera_core::GridKey;
use tessera_space::{CellDecomposer, Comb, GridShape, HyperCube, ShellBox, SpaceBox};

#[test]
fn shell_walk_visits_every_key_once_up_to_eight_axes() {
    for ndim in 1..=8 {
        let extents: Vec<usize> = (0..ndim).map(|i| 3 + i % 2).collect();
        let shape = GridShape::new(&extents).unwrap();
        let mut seen = vec![false; shape.size()];
        for codim in 0..=ndim {
            let boxes = shape.shell_boxes(codim);
            assert_eq!(boxes.len(), HyperCube::number_of_elements_r(ndim, codim));
            for b in boxes {
                for key in b.keys() {
                    let id = shape.lin_id(&key);
                    assert!(!seen[id], "{key} visited twice");
                    seen[id] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "{ndim}D walk missed keys");
    }
}

#[test]
fn opposite_faces_are_mirror_images() {
    let shape = GridShape::new(&[6, 4, 5]).unwrap();
    for comb in HyperCube::combinations_r(3, 1) {
        let face = ShellBox::from_comb(&shape, &comb).unwrap();
        let mirror = ShellBox::from_comb(&shape, &comb.negated()).unwrap();
        assert_eq!(face.len(), mirror.len());
        for axis in 0..3 {
            if comb.get(axis) != 0 {
                let e = shape.extent(axis) as i32;
                assert_eq!(face.start()[axis], e - 1 - mirror.start()[axis]);
            }
        }
    }
}

#[test]
fn interior_comb_on_short_axis_is_empty() {
    let shape = GridShape::new(&[2, 8]).unwrap();
    assert!(ShellBox::from_comb(&shape, &Comb::zero(2)).is_none());
    assert!(ShellBox::from_comb(&shape, &Comb::new(&[1, 0])).is_some());
}

#[test]
fn decomposer_grid_shells_separate_guard_ring_from_domain() {
    let cd = CellDecomposer::new(&SpaceBox::unit(2).unwrap(), &[18, 18]).unwrap();
    let interior = &cd.grid().shell_boxes(0)[0];
    assert_eq!(interior.start(), &GridKey::from([1, 1]));
    assert_eq!(interior.stop(), &GridKey::from([16, 16]));
    for key in interior.keys() {
        assert!(cd.is_interior(&key));
    }
    for codim in 1..=2 {
        for b in cd.grid().shell_boxes(codim) {
            assert!(b.keys().all(|k| !cd.is_interior(&k)));
        }
    }
}
