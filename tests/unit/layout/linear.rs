use super::*;
use crate::config::RenderConfig;
use crate::layout::layout_structure;

fn params() -> LayoutParams {
    LayoutParams::from_config(&RenderConfig::default())
}

#[test]
fn array_row_is_centered() {
    let p = params();
    let l = layout_boxes(&DataStructure::array([1, 2, 3, 4, 5]), 300.0, &p);
    assert_eq!(l.cells.len(), 5);
    let size = l.cells[0].rect.width();
    let mean_left: f64 = l.cells.iter().map(|c| c.rect.x0).sum::<f64>() / 5.0;
    assert!((mean_left + size / 2.0 - p.canvas_width / 2.0).abs() < 0.5);
    assert!(l.cells.iter().all(|c| c.rect.y0 == 300.0));
}

#[test]
fn single_element_has_no_spacing_contribution() {
    let p = params();
    let m = row_metrics(1, StructureKind::Array, &p);
    assert_eq!(m.total_width, p.element_size);
    let l = layout_boxes(&DataStructure::array([7]), 0.0, &p);
    assert!((l.cells[0].rect.center().x - p.canvas_width / 2.0).abs() < 1e-9);
}

#[test]
fn long_rows_shrink_but_respect_minimum() {
    let p = params();
    let m = row_metrics(8, StructureKind::Array, &p);
    assert!(m.size < p.element_size);
    assert!(m.total_width <= p.fill_ratio * p.canvas_width + 1e-9);
    assert!((m.spacing / m.size - p.spacing_ratio).abs() < 1e-12);

    let huge = row_metrics(200, StructureKind::Array, &p);
    assert_eq!(huge.size, p.min_element_size);
}

#[test]
fn linked_lists_use_wider_gaps() {
    let p = params();
    let a = row_metrics(3, StructureKind::Array, &p);
    let ll = row_metrics(3, StructureKind::LinkedList, &p);
    assert!(ll.spacing > a.spacing);
}

#[test]
fn explicit_position_is_top_left() {
    let p = params();
    let l = layout_boxes(&DataStructure::array([1, 2]).at(40, 900), 0.0, &p);
    assert_eq!(l.cells[0].rect.origin(), Point::new(40.0, 900.0));
}

#[test]
fn highlighted_flag_is_copied() {
    let p = params();
    let l = layout_boxes(&DataStructure::array([1, 2, 3]).highlight([1, 9]), 0.0, &p);
    let flags: Vec<bool> = l.cells.iter().map(|c| c.highlighted).collect();
    assert_eq!(flags, vec![false, true, false]);
}

#[test]
fn dict_rows_have_braces_and_separators() {
    let p = params();
    let ds = DataStructure::new(
        StructureKind::Dict,
        [ElementValue::from(("a", 1)), ElementValue::from(("bb", 2)), ElementValue::from(("c", 3))],
    );
    let l = layout_structure(&ds, 200.0, &p).unwrap();
    let texts: Vec<&str> = l.marks.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["{", ",", ",", "}"]);
    assert!(l.marks[0].center.x < l.cells[0].rect.x0);
    assert!(l.marks[3].center.x > l.cells[2].rect.x1);
    // Commas sit between neighbours.
    assert!(l.marks[1].center.x > l.cells[0].rect.x1 && l.marks[1].center.x < l.cells[1].rect.x0);
    // Width follows the text.
    assert!(l.cells[1].rect.width() > l.cells[0].rect.width());
    assert_eq!(keyed_text(StructureKind::Dict, &l.cells[1].value), "bb: 2");
}

#[test]
fn keyed_rows_keep_left_margin_and_fit() {
    let p = params();
    let many: Vec<i64> = (0..60).collect();
    let l = layout_keyed(&DataStructure::new(StructureKind::Set, many), 0.0, &p);
    let left = l.marks[0].center.x;
    assert!(left >= p.canvas_width / 10.0);
    let right = l.marks.last().unwrap().center.x;
    assert!(right - left <= p.fill_ratio * p.canvas_width);
    assert!(l.text_size < p.font_size);
}

#[test]
fn set_values_are_plain_text() {
    assert_eq!(keyed_text(StructureKind::Set, &ElementValue::from(("a", 1))), "['a', 1]");
    assert_eq!(keyed_text(StructureKind::Set, &ElementValue::Int(4)), "4");
}
