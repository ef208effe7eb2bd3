use super::*;

fn state(elements: &[i64], positions: &[(usize, (i32, i32))]) -> DataStructureState {
    DataStructureState {
        elements: elements.iter().map(|&v| v.into()).collect(),
        positions: positions.iter().copied().collect(),
        highlighted: BTreeSet::new(),
        arrows: Vec::new(),
    }
}

#[test]
fn endpoints_match_start_and_target() {
    let s = state(&[1, 2], &[(0, (0, 0)), (1, (100, 50))]);
    let mut t = state(&[2, 1], &[(0, (100, 50)), (1, (0, 0))]);
    t.highlighted.insert(1);
    t.arrows.push((0, 1));

    let at0 = s.interpolate(&t, 0.0);
    assert_eq!(at0.positions, s.positions);
    assert_eq!(at0.elements, t.elements);
    assert_eq!(at0.highlighted, t.highlighted);
    assert_eq!(at0.arrows, t.arrows);

    let at1 = s.interpolate(&t, 1.0);
    assert_eq!(at1, t);
}

#[test]
fn common_indices_move_monotonically() {
    let s = state(&[1], &[(0, (10, 200))]);
    let t = state(&[1], &[(0, (333, -77))]);
    let mut prev = s.positions[&0];
    for i in 0..=60 {
        let p = s.interpolate(&t, f64::from(i) / 60.0).positions[&0];
        assert!(p.0 >= prev.0, "x regressed at step {i}");
        assert!(p.1 <= prev.1, "y regressed at step {i}");
        prev = p;
    }
    assert_eq!(prev, (333, -77));
}

#[test]
fn positions_round_to_nearest_pixel() {
    let s = state(&[1], &[(0, (0, 0))]);
    let t = state(&[1], &[(0, (3, 0))]);
    assert_eq!(s.interpolate(&t, 0.5).positions[&0], (2, 0));
}

#[test]
fn new_indices_appear_at_target_and_old_ones_stay() {
    let s = state(&[1, 2, 3], &[(0, (0, 0)), (1, (50, 0)), (2, (100, 0))]);
    let t = state(&[1, 2], &[(0, (10, 0)), (1, (60, 0)), (5, (500, 0))]);
    let mid = s.interpolate(&t, 0.5);
    assert_eq!(mid.positions[&5], (500, 0));
    assert_eq!(mid.positions[&2], (100, 0));
    assert_eq!(mid.positions[&0], (5, 0));
    // Only target elements are drawn.
    assert_eq!(mid.visible_indices().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn progress_outside_unit_range_is_clamped() {
    let s = state(&[1], &[(0, (0, 0))]);
    let t = state(&[1], &[(0, (10, 10))]);
    assert_eq!(s.interpolate(&t, 2.0).positions[&0], (10, 10));
    assert_eq!(s.interpolate(&t, -1.0).positions[&0], (0, 0));
}
