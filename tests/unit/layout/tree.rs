use super::*;
use crate::config::RenderConfig;

fn params() -> LayoutParams {
    LayoutParams::from_config(&RenderConfig::default())
}

#[test]
fn levels_follow_complete_addressing() {
    assert_eq!(level_of(0), 0);
    assert_eq!(level_of(1), 1);
    assert_eq!(level_of(2), 1);
    assert_eq!(level_of(3), 2);
    assert_eq!(level_of(6), 2);
    assert_eq!(level_of(7), 3);
}

#[test]
fn missing_parent_hides_subtree() {
    let elems: Vec<ElementValue> = vec![1.into(), ElementValue::Null, 3.into(), 4.into(), 5.into(), 6.into()];
    assert_eq!(present_nodes(&elems), vec![0, 2, 5]);
    assert!(present_nodes(&[ElementValue::Null, 1.into()]).is_empty());
}

#[test]
fn sparse_tree_keeps_slots_aligned() {
    let p = params();
    let ds = DataStructure::tree([Some(1), Some(2), Some(3), Some(4), None, Some(6), None]);
    let l = layout_tree(&ds, 400.0, &p).unwrap();
    let c3 = l.cell(3).unwrap().rect;
    let c5 = l.cell(5).unwrap().rect;
    let c1 = l.cell(1).unwrap().rect;
    assert_eq!(c3.y0, c5.y0);
    assert!(c3.x1 <= c5.x0);

    let left = p.tree_margin;
    let width = p.canvas_width - 2.0 * p.tree_margin;
    let slot4 = slot_center_x(4, left, width);
    let d3 = c1.center().x - c3.center().x;
    let d4 = slot4 - c1.center().x;
    assert!((d3 - d4).abs() < 1e-9);
}

#[test]
fn root_is_centered_and_levels_descend() {
    let p = params();
    let l = layout_tree(&DataStructure::tree([1, 2, 3]), 400.0, &p).unwrap();
    let root = l.cell(0).unwrap().rect;
    assert!((root.center().x - p.canvas_width / 2.0).abs() < 1e-9);
    assert_eq!(root.y0, 400.0);
    assert_eq!(l.cell(1).unwrap().rect.y0, 400.0 + p.tree_level_spacing);
}

#[test]
fn node_size_is_capped_and_fits_deepest_level() {
    let p = params();
    let small = layout_tree(&DataStructure::tree([1]), 0.0, &p).unwrap();
    assert_eq!(small.cells[0].rect.width(), p.tree_max_node_size);

    let full: Vec<i64> = (0..31).collect();
    let l = layout_tree(&DataStructure::tree(full), 0.0, &p).unwrap();
    let deepest: Vec<Rect> = (15..31).map(|i| l.cell(i).unwrap().rect).collect();
    for pair in deepest.windows(2) {
        assert!(pair[0].x1 <= pair[1].x0);
    }
    assert!(deepest[0].x0 >= p.tree_margin - 1e-9);
    assert!(deepest[15].x1 <= p.canvas_width - p.tree_margin + 1e-9);
}

#[test]
fn edges_connect_parent_to_child() {
    let p = params();
    let l = layout_tree(&DataStructure::tree([Some(1), None, Some(3), None, None, Some(6)]), 0.0, &p)
        .unwrap();
    assert_eq!(l.tree_edges, vec![(0, 2), (2, 5)]);
}

#[test]
fn levels_beyond_the_limit_are_left_out() {
    let p = params();
    // A right spine one level deeper than the limit: 0, 2, 6, 14, ...
    let mut spine = vec![0usize];
    while level_of(*spine.last().unwrap()) < MAX_TREE_DEPTH {
        let last = *spine.last().unwrap();
        spine.push(2 * last + 2);
    }
    let mut elements = vec![None; spine.last().unwrap() + 1];
    for &i in &spine {
        elements[i] = Some(i as i64);
    }
    let l = layout_tree(&DataStructure::tree(elements), 0.0, &p).unwrap();

    assert_eq!(l.cells.len(), MAX_TREE_DEPTH as usize);
    assert!(l.cells.iter().all(|c| level_of(c.index) < MAX_TREE_DEPTH));
    assert!(l.cell(0).is_some());
    let last_kept = spine[MAX_TREE_DEPTH as usize - 1];
    assert!(l.cell(last_kept).is_some());
    assert!(l.cell(spine[MAX_TREE_DEPTH as usize]).is_none());
    assert_eq!(l.tree_edges.len(), MAX_TREE_DEPTH as usize - 1);
    assert!(l.tree_edges.iter().all(|&(_, child)| child <= last_kept));
}
