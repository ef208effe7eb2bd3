use crate::foundation::core::{Point, Rect};
use crate::layout::{LayoutParams, Mark, StructureLayout};
use crate::model::cell::Cell;
use crate::model::structure::{DataStructure, StructureKind};
use crate::model::value::ElementValue;

/// Average advance of one character, in ems, used to size text rows before any font is loaded.
pub const CHAR_WIDTH_EM: f64 = 0.55;

/// Cell side, gap and total width of a row of square cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowMetrics {
    /// Cell side.
    pub size: f64,
    /// Gap between neighbouring cells.
    pub spacing: f64,
    /// Width from the first cell's left edge to the last cell's right edge.
    pub total_width: f64,
}

impl RowMetrics {
    /// Left edge of cell `i` for a row starting at `start_x`.
    pub fn cell_x(&self, start_x: f64, i: usize) -> f64 {
        start_x + i as f64 * (self.size + self.spacing)
    }
}

/// Size a row of `n` square cells.
///
/// Cells keep the preferred size unless the row would exceed `fill_ratio` of the canvas width;
/// then they shrink (not below `min_element_size`) with the gap scaled along.
pub fn row_metrics(n: usize, kind: StructureKind, params: &LayoutParams) -> RowMetrics {
    let ratio = match kind {
        StructureKind::LinkedList => params.linked_list_spacing_ratio,
        _ => params.spacing_ratio,
    };
    let n = n as f64;
    let span = |size: f64| {
        if n == 0.0 {
            0.0
        } else {
            n * size + (n - 1.0) * size * ratio
        }
    };

    let mut size = params.element_size;
    let max_width = params.fill_ratio * params.canvas_width;
    if span(size) > max_width {
        size = (max_width / (n + (n - 1.0) * ratio)).max(params.min_element_size);
    }
    RowMetrics {
        size,
        spacing: size * ratio,
        total_width: span(size),
    }
}

/// Value font size inside a square cell of side `size`.
pub fn box_text_size(size: f64, font_size: f64) -> f64 {
    font_size.min(size * 0.45)
}

/// Width of `text` at `font_size` using [`CHAR_WIDTH_EM`].
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH_EM
}

/// Display text of one dict/set row.
pub fn keyed_text(kind: StructureKind, value: &ElementValue) -> String {
    match (kind, value.as_pair()) {
        (StructureKind::Dict, Some((k, v))) => format!("{k}: {v}"),
        _ => value.to_string(),
    }
}

/// Array and linked-list rows.
pub(crate) fn layout_boxes(ds: &DataStructure, top_y: f64, params: &LayoutParams) -> StructureLayout {
    let metrics = row_metrics(ds.elements.len(), ds.kind, params);
    let text_size = box_text_size(metrics.size, params.font_size);
    if ds.elements.is_empty() {
        return StructureLayout::empty(ds.kind, text_size);
    }

    let (start_x, y) = match ds.position {
        Some((x, y)) => (f64::from(x), f64::from(y)),
        None => ((params.canvas_width - metrics.total_width) / 2.0, top_y),
    };

    let cells = ds
        .elements
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let rect = Rect::from_origin_size(
                (metrics.cell_x(start_x, i), y),
                (metrics.size, metrics.size),
            );
            Cell::new(i, v.clone(), rect, ds.highlighted.contains(&i))
        })
        .collect();

    StructureLayout {
        cells,
        ..StructureLayout::empty(ds.kind, text_size)
    }
}

/// Dict and set rows: text-sized cells between `{` and `}` with `,` separators.
pub(crate) fn layout_keyed(ds: &DataStructure, top_y: f64, params: &LayoutParams) -> StructureLayout {
    if ds.elements.is_empty() {
        return StructureLayout::empty(ds.kind, params.font_size);
    }

    let texts: Vec<String> = ds.elements.iter().map(|v| keyed_text(ds.kind, v)).collect();
    let widths: Vec<f64> = texts
        .iter()
        .map(|t| estimate_text_width(t, params.font_size) + params.text_padding)
        .collect();
    let brace = estimate_text_width("{", params.font_size);
    let gap = params.keyed_spacing;
    let n = widths.len() as f64;
    let natural = 2.0 * (brace + gap) + widths.iter().sum::<f64>() + (n - 1.0) * gap;

    let max_width = params.fill_ratio * params.canvas_width;
    let scale = if natural > max_width {
        max_width / natural
    } else {
        1.0
    };
    let font = params.font_size * scale;
    let brace = brace * scale;
    let gap = gap * scale;
    let height = font + 10.0 * scale;
    let total = natural * scale;

    let (start_x, y) = match ds.position {
        Some((x, y)) => (f64::from(x), f64::from(y)),
        None => ((params.canvas_width - total) / 2.0, top_y),
    };
    let start_x = start_x.max(params.canvas_width / 10.0);
    let cy = y + height / 2.0;

    let mut marks = vec![Mark {
        text: "{".to_owned(),
        center: Point::new(start_x + brace / 2.0, cy),
    }];
    let mut cells = Vec::with_capacity(texts.len());
    let mut x = start_x + brace + gap;
    for (i, (value, w)) in ds.elements.iter().zip(&widths).enumerate() {
        let w = w * scale;
        let rect = Rect::new(x, y, x + w, y + height);
        if i > 0 {
            marks.push(Mark {
                text: ",".to_owned(),
                center: Point::new(x - gap / 2.0, cy),
            });
        }
        cells.push(Cell::new(i, value.clone(), rect, ds.highlighted.contains(&i)));
        x += w + gap;
    }
    marks.push(Mark {
        text: "}".to_owned(),
        center: Point::new(x + brace / 2.0, cy),
    });

    StructureLayout {
        cells,
        marks,
        ..StructureLayout::empty(ds.kind, font)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/linear.rs"]
mod tests;
