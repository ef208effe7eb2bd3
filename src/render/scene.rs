use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::geometry::arrow::Connector;

/// What a drawing operation depicts. Lets callers and tests query a scene by meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Canvas fill.
    Background,
    /// Code listing backdrop.
    CodePanel,
    /// Highlighted code line band.
    CodeHighlight,
    /// One code line.
    CodeText,
    /// Inline comment after a code line.
    CodeComment,
    /// Caption backdrop.
    CaptionPanel,
    /// One wrapped caption line.
    CaptionText,
    /// Element box.
    Cell,
    /// Element value.
    CellText,
    /// Text below an element.
    Label,
    /// Text above an element.
    Pointer,
    /// Vertical arrow from pointer text to its element.
    PointerArrow,
    /// Explicit connector between two elements.
    Arrow,
    /// Self-reference loop.
    SelfArrow,
    /// Sequential link between linked-list nodes.
    ListLink,
    /// Parent/child line in a tree.
    TreeEdge,
    /// Braces and separators of dicts and sets.
    Punctuation,
    /// One `name = value` line.
    Variables,
    /// "Empty ..." text standing in for an empty structure.
    Placeholder,
}

/// Horizontal placement of a text line relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Anchor is the left end of the line.
    Left,
    /// Anchor is the middle of the line.
    Center,
}

/// One primitive drawing call. Coordinates are canvas pixels and stay fractional until
/// rasterization.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Filled (optionally rounded) rectangle.
    FillRect {
        /// Area.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
        /// Corner radius.
        radius: f64,
    },
    /// Outlined (optionally rounded) rectangle.
    StrokeRect {
        /// Area.
        rect: Rect,
        /// Stroke color.
        color: Rgba8,
        /// Corner radius.
        radius: f64,
        /// Stroke width.
        width: f64,
    },
    /// Open stroked polyline.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width.
        width: f64,
    },
    /// Filled closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
        /// Fill color.
        color: Rgba8,
    },
    /// Single line of text, vertically centered on `anchor`.
    Text {
        /// Content.
        text: String,
        /// Reference point.
        anchor: Point,
        /// Horizontal placement.
        align: TextAlign,
        /// Font size in pixels.
        size: f64,
        /// Fill color.
        color: Rgba8,
    },
}

/// Drawing operation tagged with its role.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneItem {
    /// What the operation depicts.
    pub role: Role,
    /// The operation.
    pub op: DrawOp,
}

/// Ordered display list for one output frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Canvas the scene is drawn on.
    pub canvas: Canvas,
    /// Operations in paint order.
    pub items: Vec<SceneItem>,
}

impl Scene {
    /// Empty scene.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            items: Vec::new(),
        }
    }

    /// Append an operation.
    pub fn push(&mut self, role: Role, op: DrawOp) {
        self.items.push(SceneItem { role, op });
    }

    /// Append a text line.
    pub fn text(
        &mut self,
        role: Role,
        text: impl Into<String>,
        anchor: Point,
        align: TextAlign,
        size: f64,
        color: Rgba8,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(
            role,
            DrawOp::Text {
                text,
                anchor,
                align,
                size,
                color,
            },
        );
    }

    /// Append a connector as one polyline plus a polygon per head.
    pub fn connector(&mut self, role: Role, connector: &Connector, color: Rgba8, width: f64) {
        self.push(
            role,
            DrawOp::Polyline {
                points: connector.path.clone(),
                color,
                width,
            },
        );
        for head in &connector.heads {
            self.push(
                role,
                DrawOp::Polygon {
                    points: head.to_vec(),
                    color,
                },
            );
        }
    }

    /// Items with `role`, in paint order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &DrawOp> {
        self.items
            .iter()
            .filter(move |i| i.role == role)
            .map(|i| &i.op)
    }

    /// Text content of every text item with `role`.
    pub fn texts(&self, role: Role) -> Vec<&str> {
        self.with_role(role)
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Stroked paths with `role`.
    pub fn polylines(&self, role: Role) -> Vec<&[Point]> {
        self.with_role(role)
            .filter_map(|op| match op {
                DrawOp::Polyline { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Filled polygons with `role`.
    pub fn polygons(&self, role: Role) -> Vec<&[Point]> {
        self.with_role(role)
            .filter_map(|op| match op {
                DrawOp::Polygon { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
