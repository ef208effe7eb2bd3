use crate::foundation::core::Rect;
use crate::foundation::error::VizResult;
use crate::layout::linear::box_text_size;
use crate::layout::{LayoutParams, StructureLayout};
use crate::model::cell::Cell;
use crate::model::structure::DataStructure;
use crate::model::value::ElementValue;

/// Number of levels drawn; nodes below the last one are left out (their slots would be
/// sub-pixel on any real canvas).
pub const MAX_TREE_DEPTH: u32 = 16;

/// Depth of index `i` in complete-binary-tree addressing (root is level 0).
pub fn level_of(index: usize) -> u32 {
    usize::BITS - 1 - (index + 1).leading_zeros()
}

/// Present nodes reachable from the root, in ascending index order.
///
/// A `None` slot hides its whole subtree, even when the slots below it hold values.
pub fn present_nodes(elements: &[ElementValue]) -> Vec<usize> {
    let mut out = Vec::new();
    let present = |i: usize| elements.get(i).is_some_and(|v| !v.is_null());
    if !present(0) {
        return out;
    }
    let mut frontier = vec![0usize];
    while !frontier.is_empty() {
        out.extend_from_slice(&frontier);
        frontier = frontier
            .iter()
            .flat_map(|&i| [2 * i + 1, 2 * i + 2])
            .filter(|&c| present(c))
            .collect();
    }
    out
}

/// Horizontal center of slot `index` when levels split `width` (starting at `left`) evenly
/// among all `2^level` possible positions.
pub fn slot_center_x(index: usize, left: f64, width: f64) -> f64 {
    let level = level_of(index);
    let slots = 2f64.powi(level as i32);
    let slot_w = width / slots;
    let first = (1usize << level) - 1;
    left + slot_w * (index - first) as f64 + slot_w / 2.0
}

pub(crate) fn layout_tree(
    ds: &DataStructure,
    top_y: f64,
    params: &LayoutParams,
) -> VizResult<StructureLayout> {
    let mut nodes = present_nodes(&ds.elements);
    let total = nodes.len();
    nodes.retain(|&i| level_of(i) < MAX_TREE_DEPTH);
    if nodes.len() < total {
        tracing::trace!(
            dropped = total - nodes.len(),
            max_depth = MAX_TREE_DEPTH,
            "tree levels beyond the limit skipped"
        );
    }
    let Some(&deepest) = nodes.last() else {
        return Ok(StructureLayout::empty(
            ds.kind,
            box_text_size(params.tree_max_node_size, params.font_size),
        ));
    };
    let depth = level_of(deepest);

    let (left, top) = match ds.position {
        Some((x, y)) => (f64::from(x), f64::from(y)),
        None => (params.tree_margin, top_y),
    };
    let available = (params.canvas_width - 2.0 * params.tree_margin).max(1.0);
    let slots = 2f64.powi(depth as i32);
    let fit = (available - (slots - 1.0) * params.tree_min_spacing) / slots;
    let node = fit
        .max(available / slots * 0.5)
        .min(params.tree_max_node_size);

    let cells = nodes
        .iter()
        .map(|&i| {
            let cx = slot_center_x(i, left, available);
            let y = top + f64::from(level_of(i)) * params.tree_level_spacing;
            let rect = Rect::new(cx - node / 2.0, y, cx + node / 2.0, y + node);
            Cell::new(i, ds.elements[i].clone(), rect, ds.highlighted.contains(&i))
        })
        .collect();
    let tree_edges = nodes
        .iter()
        .filter(|&&i| i > 0)
        .map(|&i| ((i - 1) / 2, i))
        .collect();

    Ok(StructureLayout {
        cells,
        tree_edges,
        ..StructureLayout::empty(ds.kind, box_text_size(node, params.font_size))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
