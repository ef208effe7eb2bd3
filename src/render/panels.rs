//! Fixed overlays drawn around the structures: code listing, caption and variables.

use std::collections::BTreeMap;

use crate::config::{Metrics, Palette};
use crate::foundation::core::{Point, Rect};
use crate::layout::linear::estimate_text_width;
use crate::model::named::NamedMap;
use crate::model::value::ElementValue;
use crate::render::scene::{DrawOp, Role, Scene, TextAlign};

const CAPTION_WIDTH_RATIO: f64 = 0.85;
const CAPTION_LINE_HEIGHT: f64 = 1.2;
const CAPTION_RADIUS: f64 = 20.0;
const CODE_PANEL_MARGIN: f64 = 40.0;
const COMMENT_GAP: f64 = 20.0;
const VARIABLE_LINE_GAP: f64 = 5.0;

/// Source listing shown in the code panel, with optional per-line comments.
///
/// Lines are numbered from 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeListing {
    lines: Vec<String>,
    comments: BTreeMap<usize, String>,
}

impl CodeListing {
    /// Split `source` into lines.
    pub fn from_source(source: &str) -> Self {
        Self {
            lines: source.lines().map(str::to_owned).collect(),
            comments: BTreeMap::new(),
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when there is no line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `n` (1-based).
    pub fn line(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Attach a comment shown after line `n`. Returns `false` (and stores nothing) when `n` is
    /// not a line of the listing.
    pub fn set_comment(&mut self, n: usize, comment: impl Into<String>) -> bool {
        if self.line(n).is_none() {
            return false;
        }
        self.comments.insert(n, comment.into());
        true
    }

    /// Comment of line `n`.
    pub fn comment(&self, n: usize) -> Option<&str> {
        self.comments.get(&n).map(String::as_str)
    }

    /// Drop every comment.
    pub fn clear_comments(&mut self) {
        self.comments.clear();
    }
}

/// Draw the code panel. `highlight` outside the listing draws no band.
pub(crate) fn code_panel(
    scene: &mut Scene,
    listing: &CodeListing,
    highlight: Option<usize>,
    m: &Metrics,
    colors: &Palette,
) {
    if listing.is_empty() {
        return;
    }
    let lh = m.code_line_height;
    let n = listing.len() as f64;
    scene.push(
        Role::CodePanel,
        DrawOp::FillRect {
            rect: Rect::from_origin_size(
                (0.0, m.code_y - CODE_PANEL_MARGIN),
                (m.width, n * lh + 2.0 * CODE_PANEL_MARGIN),
            ),
            color: colors.panel,
            radius: 0.0,
        },
    );

    let line_top = |line: usize| m.code_y + (line - 1) as f64 * lh;
    if let Some(line) = highlight {
        if listing.line(line).is_some() {
            let y = line_top(line) - lh / 3.0;
            scene.push(
                Role::CodeHighlight,
                DrawOp::FillRect {
                    rect: Rect::new(m.code_x - 10.0, y, m.width - m.code_x + 10.0, y + lh),
                    color: colors.code_highlight,
                    radius: 0.0,
                },
            );
        } else {
            tracing::trace!(line, lines = listing.len(), "code line out of range");
        }
    }

    let font = m.code_font_size;
    for (i, text) in listing.lines.iter().enumerate() {
        let line = i + 1;
        let cy = line_top(line) + font / 2.0;
        scene.text(
            Role::CodeText,
            text.as_str(),
            Point::new(m.code_x, cy),
            TextAlign::Left,
            font,
            colors.text,
        );
        if let Some(comment) = listing.comment(line) {
            let x = m.code_x + estimate_text_width(text, font) + COMMENT_GAP;
            scene.text(
                Role::CodeComment,
                format!("# {comment}"),
                Point::new(x, cy),
                TextAlign::Left,
                font,
                colors.label,
            );
        }
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width` (a single long word is kept
/// on its own line).
pub fn wrap_words(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if estimate_text_width(&candidate, font_size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draw the caption panel: a band vertically centered on `caption_y` with wrapped, centered
/// lines.
pub(crate) fn caption_panel(scene: &mut Scene, caption: &str, m: &Metrics, colors: &Palette) {
    let font = m.font_size;
    let lines = wrap_words(caption, m.width * CAPTION_WIDTH_RATIO, font);
    if lines.is_empty() {
        return;
    }
    let line_h = font * CAPTION_LINE_HEIGHT;
    let text_h = lines.len() as f64 * line_h;
    let height = (m.height / 12.0).max(text_h + font);
    let panel = Rect::from_origin_size((0.0, m.caption_y - height / 2.0), (m.width, height));
    scene.push(
        Role::CaptionPanel,
        DrawOp::FillRect {
            rect: panel,
            color: colors.panel,
            radius: CAPTION_RADIUS,
        },
    );

    let first = m.caption_y - text_h / 2.0 + line_h / 2.0;
    for (i, line) in lines.into_iter().enumerate() {
        scene.text(
            Role::CaptionText,
            line,
            Point::new(m.width / 2.0, first + i as f64 * line_h),
            TextAlign::Center,
            font,
            colors.text,
        );
    }
}

/// Vertical space the variables panel takes.
pub(crate) fn variables_height(vars: &NamedMap<ElementValue>, m: &Metrics) -> f64 {
    vars.len() as f64 * (m.font_size + VARIABLE_LINE_GAP)
}

/// Draw `name = value` lines at the top-left.
pub(crate) fn variables_panel(
    scene: &mut Scene,
    vars: &NamedMap<ElementValue>,
    m: &Metrics,
    colors: &Palette,
) {
    let step = m.font_size + VARIABLE_LINE_GAP;
    for (i, (name, value)) in vars.iter().enumerate() {
        scene.text(
            Role::Variables,
            format!("{name} = {value}"),
            Point::new(m.variables_x, m.variables_y + i as f64 * step + m.font_size / 2.0),
            TextAlign::Left,
            m.font_size,
            colors.text,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/panels.rs"]
mod tests;
