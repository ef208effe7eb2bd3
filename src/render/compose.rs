use std::collections::BTreeSet;

use crate::animation::state::DataStructureState;
use crate::config::{ArrowConfig, Metrics, Palette, RenderConfig};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::VizResult;
use crate::geometry::arrow::{
    ArrowGeometry, curved_arrow, pointer_arrow, self_arrow, straight_arrow,
};
use crate::geometry::edge::anchored_segment;
use crate::layout::linear::{box_text_size, keyed_text};
use crate::layout::{LayoutParams, StructureLayout, layout_structure};
use crate::model::cell::{Cell, CellGraph};
use crate::model::frame::Frame;
use crate::model::structure::{DataStructure, StructureKind};
use crate::render::panels::{
    CodeListing, caption_panel, code_panel, variables_height, variables_panel,
};
use crate::render::scene::{DrawOp, Role, Scene, TextAlign};

const CELL_RADIUS: f64 = 10.0;
const OUTLINE_WIDTH: f64 = 2.0;
const TEXT_GAP: f64 = 5.0;

/// Panels drawn behind the structures of one output frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overlay<'a> {
    /// Code listing, if any.
    pub code: Option<&'a CodeListing>,
    /// Highlighted listing line (1-based).
    pub line: Option<usize>,
    /// Caption text.
    pub caption: Option<&'a str>,
}

/// One animated row as the sequencer holds it.
#[derive(Clone, Copy, Debug)]
pub struct TrackView<'a> {
    /// Kind of the row.
    pub kind: StructureKind,
    /// Positions, values and emphasis to draw.
    pub state: &'a DataStructureState,
    /// Cell side.
    pub cell_size: f64,
    /// Fill of non-highlighted cells.
    pub color: Rgba8,
    /// Top center of the row; the "Empty ..." text goes here when nothing is visible.
    pub anchor: Point,
}

/// Turns frames and animation states into [`Scene`]s.
///
/// Pure: nothing is kept between calls.
#[derive(Clone, Debug)]
pub struct Compositor {
    canvas: Canvas,
    metrics: Metrics,
    colors: Palette,
    arrows: ArrowConfig,
    geom: ArrowGeometry,
    params: LayoutParams,
}

impl Compositor {
    /// Compositor for `cfg`.
    pub fn new(cfg: &RenderConfig) -> Self {
        Self {
            canvas: cfg.canvas,
            metrics: cfg.metrics(),
            colors: cfg.colors,
            arrows: cfg.arrows,
            geom: cfg.arrows.geometry(),
            params: LayoutParams::from_config(cfg),
        }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Resolved sizes.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Colors.
    pub fn palette(&self) -> Palette {
        self.colors
    }

    /// Layout knobs.
    pub fn layout_params(&self) -> &LayoutParams {
        &self.params
    }

    /// Scene of one frame: background, code, caption, structures in insertion order, then
    /// variables.
    ///
    /// Fails only when a structure cannot be laid out.
    pub fn compose_frame(&self, frame: &Frame, overlay: &Overlay<'_>) -> VizResult<Scene> {
        let mut scene = self.begin(overlay);
        let mut top = self.metrics.structures_y + variables_height(&frame.variables, &self.metrics);
        for (name, ds) in frame.structures.iter() {
            let layout = layout_structure(ds, top, &self.params)?;
            top = self.draw_structure(&mut scene, name, ds, &layout, top);
        }
        variables_panel(&mut scene, &frame.variables, &self.metrics, &self.colors);
        Ok(scene)
    }

    /// Scene of the animated rows of a command session.
    pub fn compose_tracks(&self, tracks: &[TrackView<'_>], overlay: &Overlay<'_>) -> Scene {
        let mut scene = self.begin(overlay);
        for track in tracks {
            self.draw_track(&mut scene, track);
        }
        scene
    }

    fn begin(&self, overlay: &Overlay<'_>) -> Scene {
        let mut scene = Scene::new(self.canvas);
        scene.push(
            Role::Background,
            DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, self.metrics.width, self.metrics.height),
                color: self.colors.background,
                radius: 0.0,
            },
        );
        if let Some(code) = overlay.code {
            code_panel(&mut scene, code, overlay.line, &self.metrics, &self.colors);
        }
        if let Some(caption) = overlay.caption {
            caption_panel(&mut scene, caption, &self.metrics, &self.colors);
        }
        scene
    }

    /// Draw one structure and return the top edge for the next one.
    fn draw_structure(
        &self,
        scene: &mut Scene,
        name: &str,
        ds: &DataStructure,
        layout: &StructureLayout,
        top: f64,
    ) -> f64 {
        let next_top = top + self.metrics.structure_spacing;
        let Some(bounds) = layout.bounds() else {
            let anchor = match ds.position {
                Some((x, y)) => Point::new(f64::from(x), f64::from(y)),
                None => Point::new(self.metrics.width / 2.0, top + self.metrics.font_size / 2.0),
            };
            self.placeholder(scene, ds.kind, anchor);
            return next_top;
        };

        self.draw_cells(scene, layout, self.colors.element);
        match ds.kind {
            StructureKind::LinkedList => self.draw_list_links(scene, layout, ds.is_doubly),
            StructureKind::Tree => self.draw_tree_edges(scene, layout),
            _ => {}
        }
        self.draw_arrows(scene, name, layout, &ds.arrows);

        let mut looped = BTreeSet::new();
        for &i in &ds.self_arrows {
            match layout.cell(i) {
                Some(cell) => {
                    if looped.insert(i) {
                        let c = self_arrow(cell.rect, &self.geom);
                        scene.connector(Role::SelfArrow, &c, self.colors.arrow, self.arrows.thickness);
                    }
                }
                None => skipped(name, "self_arrow", i),
            }
        }

        let font = self.metrics.font_size;
        for (&i, texts) in &ds.labels {
            let Some(cell) = layout.cell(i) else {
                skipped(name, "label", i);
                continue;
            };
            let anchor = Point::new(cell.rect.center().x, cell.rect.y1 + TEXT_GAP + font / 2.0);
            scene.text(
                Role::Label,
                texts.join(" "),
                anchor,
                TextAlign::Center,
                font,
                self.colors.label,
            );
        }

        for (&i, texts) in &ds.pointers {
            let Some(cell) = layout.cell(i) else {
                skipped(name, "pointer", i);
                continue;
            };
            let lift = if looped.contains(&i) {
                self.geom.self_arrow_size * 1.5
            } else {
                0.0
            };
            self.draw_pointer(scene, cell, texts, lift);
        }

        let label_room = if ds.labels.is_empty() {
            0.0
        } else {
            font + 2.0 * TEXT_GAP
        };
        next_top.max(bounds.y1 + label_room + 2.0 * font)
    }

    fn draw_track(&self, scene: &mut Scene, track: &TrackView<'_>) {
        let state = track.state;
        let size = track.cell_size;
        let cells: Vec<Cell> = state
            .visible_indices()
            .filter_map(|i| {
                let &(x, y) = state.positions.get(&i)?;
                let rect = Rect::from_origin_size((f64::from(x), f64::from(y)), (size, size));
                Some(Cell::new(
                    i,
                    state.elements[i].clone(),
                    rect,
                    state.highlighted.contains(&i),
                ))
            })
            .collect();
        if cells.is_empty() {
            self.placeholder(scene, track.kind, track.anchor);
            return;
        }

        let mut graph = CellGraph::new(cells);
        if track.kind == StructureKind::LinkedList {
            for id in 1..graph.cells().len() {
                graph.connect(id - 1, id);
            }
        }
        let layout = StructureLayout {
            cells: graph.cells().to_vec(),
            ..StructureLayout::empty(track.kind, box_text_size(size, self.metrics.font_size))
        };

        self.draw_cells(scene, &layout, track.color);
        for (a, b) in graph.edges() {
            let (start, end) = anchored_segment(graph.cells()[a].rect, graph.cells()[b].rect);
            let c = straight_arrow(start, end, self.geom.head_size, false);
            scene.connector(Role::ListLink, &c, self.colors.arrow, self.arrows.thickness);
        }
        self.draw_arrows(scene, track.kind.as_str(), &layout, &state.arrows);
    }

    fn placeholder(&self, scene: &mut Scene, kind: StructureKind, anchor: Point) {
        scene.text(
            Role::Placeholder,
            kind.empty_caption(),
            anchor,
            TextAlign::Center,
            self.metrics.font_size,
            self.colors.text,
        );
    }

    fn draw_cells(&self, scene: &mut Scene, layout: &StructureLayout, fill: Rgba8) {
        let outlined = matches!(layout.kind, StructureKind::Tree | StructureKind::LinkedList);
        for cell in &layout.cells {
            let color = if cell.highlighted {
                self.colors.highlight
            } else {
                fill
            };
            scene.push(
                Role::Cell,
                DrawOp::FillRect {
                    rect: cell.rect,
                    color,
                    radius: CELL_RADIUS,
                },
            );
            if outlined {
                scene.push(
                    Role::Cell,
                    DrawOp::StrokeRect {
                        rect: cell.rect,
                        color: self.colors.text,
                        radius: CELL_RADIUS,
                        width: OUTLINE_WIDTH,
                    },
                );
            }
            let text = if layout.kind.is_keyed() {
                keyed_text(layout.kind, &cell.value)
            } else {
                cell.value.to_string()
            };
            scene.text(
                Role::CellText,
                text,
                cell.rect.center(),
                TextAlign::Center,
                layout.text_size,
                self.colors.text,
            );
        }
        for mark in &layout.marks {
            scene.text(
                Role::Punctuation,
                mark.text.as_str(),
                mark.center,
                TextAlign::Center,
                layout.text_size,
                self.colors.text,
            );
        }
    }

    fn draw_list_links(&self, scene: &mut Scene, layout: &StructureLayout, doubly: bool) {
        let off = self.arrows.doubly_offset;
        for pair in layout.cells.windows(2) {
            let (a, b) = (pair[0].rect, pair[1].rect);
            let cy = a.center().y;
            let forward = straight_arrow(
                Point::new(a.x1, cy),
                Point::new(b.x0, cy),
                self.geom.head_size,
                false,
            );
            scene.connector(Role::ListLink, &forward, self.colors.arrow, self.arrows.thickness);
            if doubly {
                let backward = straight_arrow(
                    Point::new(b.x0, cy + off),
                    Point::new(a.x1, cy + off),
                    self.geom.head_size,
                    false,
                );
                scene.connector(Role::ListLink, &backward, self.colors.arrow, self.arrows.thickness);
            }
        }
    }

    fn draw_tree_edges(&self, scene: &mut Scene, layout: &StructureLayout) {
        for &(parent, child) in &layout.tree_edges {
            let (Some(p), Some(c)) = (layout.cell(parent), layout.cell(child)) else {
                continue;
            };
            scene.push(
                Role::TreeEdge,
                DrawOp::Polyline {
                    points: vec![
                        Point::new(p.rect.center().x, p.rect.y1),
                        Point::new(c.rect.center().x, c.rect.y0),
                    ],
                    color: self.colors.arrow,
                    width: self.arrows.thickness,
                },
            );
        }
    }

    fn draw_arrows(
        &self,
        scene: &mut Scene,
        name: &str,
        layout: &StructureLayout,
        arrows: &[(usize, usize)],
    ) {
        for (a, b, double) in collapse_arrows(arrows) {
            let (Some(from), Some(to)) = (layout.cell(a), layout.cell(b)) else {
                tracing::trace!(structure = name, from = a, to = b, "arrow out of range, skipped");
                continue;
            };
            if a == b {
                let c = self_arrow(from.rect, &self.geom);
                scene.connector(Role::SelfArrow, &c, self.colors.arrow, self.arrows.thickness);
                continue;
            }
            let (start, end) = anchored_segment(from.rect, to.rect);
            let c = curved_arrow(start, end, &self.geom, double);
            scene.connector(Role::Arrow, &c, self.colors.arrow, self.arrows.thickness);
        }
    }

    fn draw_pointer(&self, scene: &mut Scene, cell: &Cell, texts: &[String], lift: f64) {
        let mut unique: Vec<&str> = Vec::with_capacity(texts.len());
        for t in texts {
            if !unique.contains(&t.as_str()) {
                unique.push(t.as_str());
            }
        }
        if unique.is_empty() {
            return;
        }

        let arrow = pointer_arrow(
            cell.rect,
            self.arrows.pointer_length,
            lift,
            self.geom.head_size * 0.6,
        );
        scene.connector(Role::PointerArrow, &arrow, self.colors.pointer, self.arrows.thickness);

        let font = self.metrics.font_size;
        let top = arrow.path.first().map_or(cell.rect.y0, |p| p.y);
        let x = cell.rect.center().x;
        let n = unique.len();
        for (k, text) in unique.into_iter().enumerate() {
            let y = top - TEXT_GAP - font / 2.0 - (n - 1 - k) as f64 * (font + TEXT_GAP);
            scene.text(
                Role::Pointer,
                text,
                Point::new(x, y),
                TextAlign::Center,
                font,
                self.colors.pointer,
            );
        }
    }
}

/// Merge `(a, b)` with `(b, a)` into one double-headed entry and drop duplicates, keeping first
/// occurrence order.
pub(crate) fn collapse_arrows(arrows: &[(usize, usize)]) -> Vec<(usize, usize, bool)> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for &(a, b) in arrows {
        if !seen.insert((a.min(b), a.max(b))) {
            continue;
        }
        let double = a != b && arrows.contains(&(b, a));
        out.push((a, b, double));
    }
    out
}

fn skipped(structure: &str, what: &'static str, index: usize) {
    tracing::trace!(structure, what, index, "index out of range, skipped");
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
