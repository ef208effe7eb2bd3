use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::math::lerp_round;
use crate::model::value::ElementValue;

/// Positioned snapshot of one animated row.
///
/// Positions are top-left cell corners in whole pixels, keyed by element index. Two states are
/// the endpoints of a transition; [`DataStructureState::interpolate`] yields the frames between.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataStructureState {
    /// Element values in index order.
    pub elements: Vec<ElementValue>,
    /// Top-left corner per element index.
    pub positions: BTreeMap<usize, (i32, i32)>,
    /// Highlighted indices.
    pub highlighted: BTreeSet<usize>,
    /// Curved connectors between element indices.
    pub arrows: Vec<(usize, usize)>,
}

impl DataStructureState {
    /// Blend toward `target` at `progress` in `[0, 1]`.
    ///
    /// Elements, highlights and arrows are taken from `target`. Indices in both states move
    /// linearly; indices only in `target` sit at their target position; indices only in `self`
    /// keep their old position.
    pub fn interpolate(&self, target: &Self, progress: f64) -> Self {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let mut positions = BTreeMap::new();
        for (&i, &(sx, sy)) in &self.positions {
            let pos = match target.positions.get(&i) {
                Some(&(ex, ey)) => (lerp_round(sx, ex, t), lerp_round(sy, ey, t)),
                None => (sx, sy),
            };
            positions.insert(i, pos);
        }
        for (&i, &pos) in &target.positions {
            positions.entry(i).or_insert(pos);
        }
        Self {
            elements: target.elements.clone(),
            positions,
            highlighted: target.highlighted.clone(),
            arrows: target.arrows.clone(),
        }
    }

    /// Indices drawn for this state: every element that has a position.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.elements.len()).filter(|i| self.positions.contains_key(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
