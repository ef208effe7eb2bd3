use std::collections::BTreeSet;

use crate::foundation::core::Rect;
use crate::model::value::ElementValue;

/// Render-time projection of one element: its value, box and emphasis.
///
/// Cells are rebuilt for every composed frame and never outlive it.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Element index inside its structure.
    pub index: usize,
    /// Displayed value.
    pub value: ElementValue,
    /// Box in canvas pixels.
    pub rect: Rect,
    /// Drawn with the highlight color.
    pub highlighted: bool,
}

impl Cell {
    /// Build a cell.
    pub fn new(index: usize, value: ElementValue, rect: Rect, highlighted: bool) -> Self {
        Self {
            index,
            value,
            rect,
            highlighted,
        }
    }
}

/// Cells plus a symmetric adjacency set keyed by cell id (position in [`CellGraph::cells`]).
///
/// Used by the state-animation path for generic connector drawing. It is independent from a
/// structure's explicit `arrows`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellGraph {
    cells: Vec<Cell>,
    adjacency: Vec<BTreeSet<usize>>,
}

impl CellGraph {
    /// Graph without edges.
    pub fn new(cells: Vec<Cell>) -> Self {
        let adjacency = vec![BTreeSet::new(); cells.len()];
        Self { cells, adjacency }
    }

    /// Cells in id order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Connect `a` and `b` in both directions.
    ///
    /// Returns `false` for unknown ids, self-connections, or an existing edge.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.cells.len() || b >= self.cells.len() {
            return false;
        }
        let added = self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
        added
    }

    /// Remove the edge between `a` and `b` in both directions.
    pub fn disconnect(&mut self, a: usize, b: usize) -> bool {
        if a >= self.cells.len() || b >= self.cells.len() {
            return false;
        }
        let removed = self.adjacency[a].remove(&b);
        self.adjacency[b].remove(&a);
        removed
    }

    /// `true` when `a` and `b` are connected.
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(&b))
    }

    /// Ids adjacent to `id`.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(id).into_iter().flatten().copied()
    }

    /// Each undirected edge once, as `(low, high)` in ascending order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(a, n)| n.range(a + 1..).map(move |&b| (a, b)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/cell.rs"]
mod tests;
