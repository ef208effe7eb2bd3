//! Placement of structure elements on the canvas.
//!
//! Each [`StructureKind`] maps to exactly one rule: rows for array, linked list, dict and set,
//! complete-binary-tree slots for trees. Layout is a pure function of the structure, a top edge
//! and [`LayoutParams`].

pub(crate) mod linear;
pub(crate) mod tree;

use crate::config::RenderConfig;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::VizResult;
use crate::model::cell::Cell;
use crate::model::structure::{DataStructure, StructureKind};

/// Size knobs the layout rules need, resolved to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Canvas width.
    pub canvas_width: f64,
    /// Preferred cell side.
    pub element_size: f64,
    /// Smallest cell side when shrinking to fit.
    pub min_element_size: f64,
    /// Array gap as a fraction of the cell side.
    pub spacing_ratio: f64,
    /// Linked-list gap as a fraction of the cell side.
    pub linked_list_spacing_ratio: f64,
    /// Gap between dict/set rows.
    pub keyed_spacing: f64,
    /// Share of the canvas width a row may use.
    pub fill_ratio: f64,
    /// Padding around dict/set row text.
    pub text_padding: f64,
    /// Value font size.
    pub font_size: f64,
    /// Tree side margin.
    pub tree_margin: f64,
    /// Largest tree node side.
    pub tree_max_node_size: f64,
    /// Smallest gap between nodes on the deepest tree level.
    pub tree_min_spacing: f64,
    /// Distance between tree levels.
    pub tree_level_spacing: f64,
}

impl LayoutParams {
    /// Resolve layout knobs from a render config.
    pub fn from_config(cfg: &RenderConfig) -> Self {
        let m = cfg.metrics();
        let l = &cfg.layout;
        Self {
            canvas_width: m.width,
            element_size: m.element_size,
            min_element_size: m.min_element_size,
            spacing_ratio: l.spacing_ratio,
            linked_list_spacing_ratio: l.linked_list_spacing_ratio,
            keyed_spacing: l.keyed_spacing,
            fill_ratio: l.fill_ratio,
            text_padding: l.text_padding,
            font_size: m.font_size,
            tree_margin: l.tree_margin,
            tree_max_node_size: l.tree_max_node_size,
            tree_min_spacing: l.tree_min_spacing,
            tree_level_spacing: m.tree_level_spacing,
        }
    }

    /// Same params with a different preferred cell side.
    pub fn with_element_size(mut self, size: f64) -> Self {
        self.element_size = size;
        self.min_element_size = self.min_element_size.min(size);
        self
    }
}

/// Glyphs that belong to a structure but not to any element (braces, separators).
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Text to draw.
    pub text: String,
    /// Center of the text.
    pub center: Point,
}

/// Positioned cells of one structure plus the extra marks its kind needs.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureLayout {
    /// Kind that produced this layout.
    pub kind: StructureKind,
    /// Present cells in ascending element index.
    pub cells: Vec<Cell>,
    /// Parent/child element index pairs (trees only).
    pub tree_edges: Vec<(usize, usize)>,
    /// Braces and separators (dict and set only).
    pub marks: Vec<Mark>,
    /// Font size for values and marks.
    pub text_size: f64,
}

impl StructureLayout {
    pub(crate) fn empty(kind: StructureKind, text_size: f64) -> Self {
        Self {
            kind,
            cells: Vec::new(),
            tree_edges: Vec::new(),
            marks: Vec::new(),
            text_size,
        }
    }

    /// Cell of element `index`, if it was laid out.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells
            .binary_search_by_key(&index, |c| c.index)
            .ok()
            .map(|i| &self.cells[i])
    }

    /// `true` when no cell was produced.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Union of all cell boxes, or `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        self.cells.iter().map(|c| c.rect).reduce(|a, b| a.union(b))
    }
}

/// Lay out `ds` with its top edge at `top_y` unless the structure carries an explicit position.
pub fn layout_structure(
    ds: &DataStructure,
    top_y: f64,
    params: &LayoutParams,
) -> VizResult<StructureLayout> {
    match ds.kind {
        StructureKind::Array | StructureKind::LinkedList => Ok(linear::layout_boxes(ds, top_y, params)),
        StructureKind::Dict | StructureKind::Set => Ok(linear::layout_keyed(ds, top_y, params)),
        StructureKind::Tree => tree::layout_tree(ds, top_y, params),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
